//! Pie and doughnut renderers.
use plotly::layout::Layout as PlotLayout;
use plotly::{Pie, Plot};
use serde_json::json;

use crate::charts::bar::plot_margin;
use crate::charts::{ensure_drawable, ChartOptions, DoughnutChart, ValuesChart};
use crate::color::assign_colors;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::format::format_number;
use crate::plot::PlotSpec;
use crate::surface::Layout;

/// One slice and its share of the whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    /// Fraction of the total, in `[0, 1]` for non-negative data.
    pub share: f64,
    pub show_label: bool,
}

/// Shares of the raw values; the total need not be 100.
pub fn slice_shares(labels: &[String], values: &[f64], label_threshold: f64) -> Vec<Slice> {
    let n = labels.len().min(values.len());
    let total: f64 = values[..n].iter().sum();
    (0..n)
        .map(|i| {
            let share = if total == 0.0 { 0.0 } else { values[i] / total };
            Slice {
                label: labels[i].clone(),
                value: values[i],
                share,
                show_label: share >= label_threshold,
            }
        })
        .collect()
}

fn draw(
    kind: &str,
    labels: &[String],
    data: &[f64],
    hole: Option<f64>,
    options: &ChartOptions,
    layout: Layout,
    config: &RenderConfig,
) -> Result<PlotSpec> {
    let slices = slice_shares(labels, data, config.slice_label_threshold);
    let colors = assign_colors(slices.len(), options.color_mode);

    let mut text = Vec::with_capacity(slices.len());
    let mut hover = Vec::with_capacity(slices.len());
    for slice in &slices {
        let percent = format!("{:.1}%", slice.share * 100.0);
        hover.push(format!("{}: {} ({})", slice.label, format_number(slice.value), percent));
        text.push(if slice.show_label { percent } else { String::new() });
    }

    let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let names: Vec<String> = slices.iter().map(|s| s.label.clone()).collect();
    let mut trace = Pie::new(values).labels(names).name(kind);
    if let Some(hole) = hole {
        trace = trace.hole(hole);
    }

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        PlotLayout::new()
            .width(layout.width as usize)
            .height(layout.height as usize)
            .margin(plot_margin(config))
            .show_legend(options.show_legend),
    );

    let mut spec = PlotSpec::from_plot(&plot)?;
    // first slice at 12 o'clock, in the order given
    spec.set_trace_attr(0, "sort", json!(false));
    spec.set_trace_attr(0, "direction", json!("clockwise"));
    spec.set_trace_attr(0, "text", json!(text));
    spec.set_trace_attr(0, "textinfo", json!("text"));
    spec.set_trace_attr(0, "hovertext", json!(hover));
    spec.set_trace_attr(0, "hovertemplate", json!("%{hovertext}<extra></extra>"));
    spec.set_trace_attr(
        0,
        "marker",
        json!({ "colors": colors, "line": { "color": "#ffffff", "width": 1.5 } }),
    );
    if hole.is_some() {
        let total: f64 = slices.iter().map(|s| s.value).sum();
        spec.set_layout_attr(
            "annotations",
            json!([{ "text": format_number(total), "showarrow": false, "font": { "size": 18 } }]),
        );
    }
    Ok(spec)
}

pub fn pie(chart: &ValuesChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("pie", &chart.labels, &[chart.data.as_slice()])?;
    draw("pie", &chart.labels, &chart.data, None, &chart.options, layout, config)
}

/// Pie with a hole; `cutout` is the inner radius as a percentage of the
/// outer one, clamped to `[0, 95]`.
pub fn doughnut(chart: &DoughnutChart, layout: Layout, config: &RenderConfig) -> Result<PlotSpec> {
    ensure_drawable("doughnut", &chart.labels, &[chart.data.as_slice()])?;
    let cutout = chart.cutout.unwrap_or(config.default_cutout).clamp(0.0, 95.0);
    draw(
        "doughnut",
        &chart.labels,
        &chart.data,
        Some(cutout / 100.0),
        &chart.options,
        layout,
        config,
    )
}
