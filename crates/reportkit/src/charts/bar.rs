//! Bar chart renderers: grouped, comparison, percentage, multi-colour and
//! normalised multi-scale bars, all built as plotly bar traces.
use plotly::common::{DashType, HoverInfo, Line, Marker, Mode, TextPosition};
use plotly::layout::{Axis, BarMode, Layout as PlotLayout, Margin};
use plotly::{Bar, Plot, Scatter};
use serde_json::json;

use crate::charts::{ensure_drawable, tooltip, ChartOptions, SeriesChart, ValuesChart};
use crate::color::{assign_colors, series_color, ColorMode, PALETTE};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::format::{format_number, format_percent};
use crate::normalize::{is_mixed_sign, normalize_columns};
use crate::plot::PlotSpec;
use crate::surface::Layout;

/// Rotate category labels once there are more than this many.
const CROWDED_CATEGORIES: usize = 8;

const HOVER_TEMPLATE: &str = "%{hovertext}<extra></extra>";

fn positions(labels: &[String], data: &[f64]) -> usize {
    labels.len().min(data.len())
}

fn gender_or_series_color(mode: ColorMode, label: &str, index: usize) -> String {
    match mode {
        ColorMode::Gender => assign_colors(index + 1, ColorMode::Gender)
            .get(index)
            .cloned()
            .unwrap_or_else(|| series_color(label, index).to_string()),
        ColorMode::Palette => series_color(label, index).to_string(),
    }
}

fn series_slices(chart: &SeriesChart) -> Vec<&[f64]> {
    chart.datasets.iter().map(|d| d.data.as_slice()).collect()
}

pub(crate) fn plot_margin(config: &RenderConfig) -> Margin {
    Margin::new()
        .top(config.margin.top as usize)
        .right(config.margin.right as usize)
        .bottom(config.margin.bottom as usize)
        .left(config.margin.left as usize)
}

/// Value axis and category axis shared by every bar chart.
fn bar_layout(
    options: &ChartOptions,
    y_axis_title: Option<&str>,
    y_range: Option<(f64, f64)>,
    categories: usize,
    show_legend: bool,
    layout: Layout,
    config: &RenderConfig,
) -> PlotLayout {
    let mut x_axis = Axis::new().show_line(true).show_grid(false);
    if categories > CROWDED_CATEGORIES {
        x_axis = x_axis.tick_angle(-35.0);
    }
    if let Some(title) = options.x_axis_title.as_deref() {
        x_axis = x_axis.title(title);
    }

    let mut y_axis = Axis::new().show_line(true).zero_line(true).n_ticks(config.y_ticks);
    if let Some(title) = y_axis_title {
        y_axis = y_axis.title(title);
    }
    if let Some((lo, hi)) = y_range {
        y_axis = y_axis.range(vec![lo, hi]);
    }

    PlotLayout::new()
        .width(layout.width as usize)
        .height(layout.height as usize)
        .margin(plot_margin(config))
        .show_legend(show_legend)
        .bar_mode(BarMode::Group)
        .x_axis(x_axis)
        .y_axis(y_axis)
}

fn bar_trace(
    x: Vec<String>,
    y: Vec<f64>,
    name: &str,
    marker: Marker,
    hover: Vec<String>,
    value_labels: Option<Vec<String>>,
) -> Box<Bar<String, f64>> {
    let trace = Bar::new(x, y)
        .name(name)
        .marker(marker)
        .hover_text_array(hover)
        .hover_template(HOVER_TEMPLATE);
    match value_labels {
        Some(text) => trace.text_array(text).text_position(TextPosition::Outside),
        None => trace,
    }
}

/// One trace per dataset, grouped side by side within each category.
fn series_plot(chart: &SeriesChart, show_values: bool, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    let mut plot = Plot::new();
    for (s, dataset) in chart.datasets.iter().enumerate() {
        let n = positions(&chart.labels, &dataset.data);
        let x = chart.labels[..n].to_vec();
        let y = dataset.data[..n].to_vec();
        let display: Vec<String> = y.iter().map(|v| format_number(*v)).collect();
        let hover = x
            .iter()
            .zip(&display)
            .map(|(category, shown)| tooltip(category, Some(&dataset.label), shown))
            .collect();
        let color = gender_or_series_color(chart.options.color_mode, &dataset.label, s);
        plot.add_trace(bar_trace(
            x,
            y,
            &dataset.label,
            Marker::new().color(color),
            hover,
            show_values.then_some(display),
        ));
    }
    plot.set_layout(bar_layout(
        &chart.options,
        chart.options.y_axis_title.as_deref(),
        None,
        chart.labels.len(),
        chart.options.show_legend,
        layout,
        config,
    ));
    PlotSpec::from_plot(&plot)
}

/// Grouped bars: one group per label, one bar per dataset.
pub fn grouped(chart: &SeriesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("bar", &chart.labels, &series_slices(chart))?;
    series_plot(chart, chart.options.show_values.unwrap_or(false), layout, config)
}

/// Grouped bars that label every bar with its value by default.
pub fn comparison(chart: &SeriesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("comparison", &chart.labels, &series_slices(chart))?;
    series_plot(chart, chart.options.show_values.unwrap_or(true), layout, config)
}

/// Single series on a fixed 0-100 axis.
pub fn percentage(chart: &ValuesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("percentage", &chart.labels, &[chart.data.as_slice()])?;
    let color = match chart.options.color_mode {
        ColorMode::Gender => assign_colors(1, ColorMode::Gender)[0].clone(),
        ColorMode::Palette => PALETTE[0].to_string(),
    };
    let n = positions(&chart.labels, &chart.data);
    let x = chart.labels[..n].to_vec();
    let y = chart.data[..n].to_vec();
    let display: Vec<String> = y.iter().map(|v| format_percent(*v)).collect();
    let hover = x.iter().zip(&display).map(|(c, shown)| tooltip(c, None, shown)).collect();
    let show_values = chart.options.show_values.unwrap_or(true);

    let mut plot = Plot::new();
    plot.add_trace(bar_trace(
        x,
        y,
        "percentage",
        Marker::new().color(color),
        hover,
        show_values.then_some(display),
    ));
    plot.set_layout(bar_layout(
        &chart.options,
        chart.options.y_axis_title.as_deref(),
        Some((0.0, chart.options.y_max.unwrap_or(100.0))),
        n,
        false,
        layout,
        config,
    ));
    PlotSpec::from_plot(&plot)
}

/// Single series with one colour per category.
pub fn multi_color(chart: &ValuesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("multiColor", &chart.labels, &[chart.data.as_slice()])?;
    let n = positions(&chart.labels, &chart.data);
    let palette = assign_colors(n, chart.options.color_mode);
    let colors: Vec<String> = (0..n).map(|i| palette[i % palette.len()].clone()).collect();
    let x = chart.labels[..n].to_vec();
    let y = chart.data[..n].to_vec();
    let display: Vec<String> = y.iter().map(|v| format_number(*v)).collect();
    let hover = x.iter().zip(&display).map(|(c, shown)| tooltip(c, None, shown)).collect();
    let show_values = chart.options.show_values.unwrap_or(false);

    let mut plot = Plot::new();
    plot.add_trace(bar_trace(
        x,
        y,
        "multiColor",
        Marker::new().color_array(colors),
        hover,
        show_values.then_some(display),
    ));
    plot.set_layout(bar_layout(
        &chart.options,
        chart.options.y_axis_title.as_deref(),
        None,
        n,
        false,
        layout,
        config,
    ));
    PlotSpec::from_plot(&plot)
}

/// Datasets in unrelated units, normalised per category onto 0-100.
///
/// Bar heights are the normalised values. Each trace carries the caller's
/// values as `customdata`, and its hover text shows them with the unit.
pub fn multi_scale(chart: &SeriesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("multiScale", &chart.labels, &series_slices(chart))?;
    let raw: Vec<Vec<f64>> = chart.datasets.iter().map(|d| d.data.clone()).collect();
    let norm = normalize_columns(&raw);

    let width = raw.iter().map(Vec::len).max().unwrap_or(0);
    let any_mixed = (0..width).any(|i| {
        let column: Vec<f64> = raw.iter().filter_map(|s| s.get(i).copied()).collect();
        is_mixed_sign(&column)
    });
    let show_values = chart.options.show_values.unwrap_or(false);

    let mut plot = Plot::new();
    let mut originals = Vec::with_capacity(chart.datasets.len());
    let (mut lo, mut hi) = (0.0_f64, 100.0_f64);
    for (s, dataset) in chart.datasets.iter().enumerate() {
        let n = positions(&chart.labels, &dataset.data);
        let unit = dataset.unit.as_deref().unwrap_or("");
        let x = chart.labels[..n].to_vec();
        let heights = norm.normalized[s][..n].to_vec();
        let original = norm.original[s][..n].to_vec();
        for h in &heights {
            lo = lo.min(*h);
            hi = hi.max(*h);
        }
        let display: Vec<String> = original
            .iter()
            .map(|v| format!("{}{}", format_number(*v), unit))
            .collect();
        let hover = x
            .iter()
            .zip(&display)
            .map(|(category, shown)| tooltip(category, Some(&dataset.label), shown))
            .collect();
        let color = gender_or_series_color(chart.options.color_mode, &dataset.label, s);
        plot.add_trace(bar_trace(
            x,
            heights,
            &dataset.label,
            Marker::new().color(color),
            hover,
            show_values.then_some(display),
        ));
        originals.push(original);
    }

    if any_mixed {
        // zero sits at 50 on a mixed-sign column
        plot.add_trace(
            Scatter::new(chart.labels.clone(), vec![50.0; chart.labels.len()])
                .name("zero")
                .mode(Mode::Lines)
                .show_legend(false)
                .hover_info(HoverInfo::Skip)
                .line(Line::new().color("#9ca3af").dash(DashType::Dash)),
        );
    }

    let y_axis_title = chart
        .options
        .y_axis_title
        .as_deref()
        .unwrap_or("Relative scale (0-100)");
    plot.set_layout(bar_layout(
        &chart.options,
        Some(y_axis_title),
        Some((lo, hi)),
        chart.labels.len(),
        chart.options.show_legend,
        layout,
        config,
    ));

    let mut spec = PlotSpec::from_plot(&plot)?;
    for (s, values) in originals.iter().enumerate() {
        spec.set_trace_attr(s, "customdata", json!(values));
    }
    log::debug!(
        "[ReportKit::Charts] multiScale: {} datasets over {} categories, mixed sign: {}",
        chart.datasets.len(),
        chart.labels.len(),
        any_mixed
    );
    Ok(spec)
}
