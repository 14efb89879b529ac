//! Chart descriptions and the renderer dispatch.
//!
//! Every renderer is a pure function from a chart description and a
//! resolved [`Layout`] to a [`Drawing`]; [`render_chart`] creates the surface
//! and [`redraw`] replaces what an existing surface shows.
pub mod bar;
pub mod lenient;
pub mod pie;
pub mod table;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::ColorMode;
use crate::config::RenderConfig;
use crate::error::{ReportError, Result};
use crate::surface::{BuildContext, Drawing, Layout, SurfaceId, SurfaceKind};

pub use table::{Cell, CellFormatter, TableChart, TableData, TableModel, TableView};

/// Display options shared by all chart kinds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: Option<String>,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub show_legend: bool,
    pub color_mode: ColorMode,
    /// Value labels above bars; each renderer picks its own default.
    pub show_values: Option<bool>,
    pub y_max: Option<f64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            x_axis_title: None,
            y_axis_title: None,
            show_legend: true,
            color_mode: ColorMode::Palette,
            show_values: None,
            y_max: None,
        }
    }
}

impl ChartOptions {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }
}

/// One named series aligned to the chart labels.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    #[serde(deserialize_with = "lenient::numbers")]
    pub data: Vec<f64>,
    /// Suffix appended to values in tooltips, e.g. `"%"` or `" USD"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Dataset {
    pub fn new(label: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            data,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }
}

/// Several series over shared category labels.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SeriesChart {
    #[serde(deserialize_with = "lenient::labels")]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub options: ChartOptions,
}

/// A single series over category labels.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ValuesChart {
    #[serde(deserialize_with = "lenient::labels")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub data: Vec<f64>,
    #[serde(default)]
    pub options: ChartOptions,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DoughnutChart {
    #[serde(deserialize_with = "lenient::labels")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient::numbers")]
    pub data: Vec<f64>,
    /// Inner radius as a percentage of the outer radius.
    #[serde(default)]
    pub cutout: Option<f64>,
    #[serde(default)]
    pub options: ChartOptions,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Chart {
    #[serde(rename = "bar", alias = "grouped")]
    Grouped(SeriesChart),
    Percentage(ValuesChart),
    MultiColor(ValuesChart),
    Comparison(SeriesChart),
    Pie(ValuesChart),
    Doughnut(DoughnutChart),
    MultiScale(SeriesChart),
    Table(TableChart),
    /// An entry that did not parse; drawing it fails with the parse error.
    #[serde(skip)]
    Malformed(MalformedChart),
}

#[derive(Debug, Clone)]
pub struct MalformedChart {
    /// The entry's `type`, or `"unknown"`.
    pub kind: String,
    pub reason: String,
    pub options: ChartOptions,
    pub source: Value,
}

impl Chart {
    /// Parse one chart entry, keeping entries that do not parse as
    /// [`Chart::Malformed`].
    pub fn from_value(value: Value) -> Chart {
        match Chart::deserialize(&value) {
            Ok(chart) => chart,
            Err(e) => {
                let kind = value
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                let options = value
                    .get("options")
                    .and_then(|o| ChartOptions::deserialize(o).ok())
                    .unwrap_or_default();
                log::warn!("[ReportKit::Charts] unreadable {} chart: {}", kind, e);
                Chart::Malformed(MalformedChart {
                    kind,
                    reason: e.to_string(),
                    options,
                    source: value,
                })
            }
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Chart::Grouped(_) => "bar",
            Chart::Percentage(_) => "percentage",
            Chart::MultiColor(_) => "multiColor",
            Chart::Comparison(_) => "comparison",
            Chart::Pie(_) => "pie",
            Chart::Doughnut(_) => "doughnut",
            Chart::MultiScale(_) => "multiScale",
            Chart::Table(_) => "table",
            Chart::Malformed(m) => &m.kind,
        }
    }

    pub fn options(&self) -> &ChartOptions {
        match self {
            Chart::Grouped(c) | Chart::Comparison(c) | Chart::MultiScale(c) => &c.options,
            Chart::Percentage(c) | Chart::MultiColor(c) | Chart::Pie(c) => &c.options,
            Chart::Doughnut(c) => &c.options,
            Chart::Table(t) => &t.options,
            Chart::Malformed(m) => &m.options,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.options().title.as_deref()
    }

    fn surface_kind(&self) -> SurfaceKind {
        match self {
            Chart::Table(_) => SurfaceKind::Table,
            _ => SurfaceKind::Chart,
        }
    }

    fn layout(&self, config: &RenderConfig) -> Layout {
        match self {
            Chart::Pie(_) | Chart::Doughnut(_) => Layout {
                width: config.chart_width,
                height: config.pie_size,
            },
            _ => Layout {
                width: config.chart_width,
                height: config.chart_height,
            },
        }
    }
}

/// Label/data length mismatches, one message per offending series.
///
/// Mismatches are tolerated: renderers draw the positions both sides cover.
pub fn shape_warnings(chart: &Chart) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut check = |labels: usize, series: &str, len: usize| {
        if labels != len {
            warnings.push(format!(
                "{} chart: {} labels but series '{}' has {} values",
                chart.kind(),
                labels,
                series,
                len
            ));
        }
    };
    match chart {
        Chart::Grouped(c) | Chart::Comparison(c) | Chart::MultiScale(c) => {
            for d in &c.datasets {
                check(c.labels.len(), &d.label, d.data.len());
            }
        }
        Chart::Percentage(c) | Chart::MultiColor(c) | Chart::Pie(c) => {
            check(c.labels.len(), "data", c.data.len());
        }
        Chart::Doughnut(c) => check(c.labels.len(), "data", c.data.len()),
        Chart::Table(t) => {
            if let TableData::Parallel { labels, values } = &t.data {
                check(labels.len(), "values", values.len());
            }
        }
        Chart::Malformed(_) => {}
    }
    warnings
}

/// Build the drawing for `chart` at the given size.
pub fn build_drawing(chart: &Chart, layout: Layout, config: &RenderConfig) -> Result<Drawing> {
    let drawing = match chart {
        Chart::Grouped(c) => Drawing::Plot(bar::grouped(c, layout, config)?),
        Chart::Percentage(c) => Drawing::Plot(bar::percentage(c, layout, config)?),
        Chart::MultiColor(c) => Drawing::Plot(bar::multi_color(c, layout, config)?),
        Chart::Comparison(c) => Drawing::Plot(bar::comparison(c, layout, config)?),
        Chart::MultiScale(c) => Drawing::Plot(bar::multi_scale(c, layout, config)?),
        Chart::Pie(c) => Drawing::Plot(pie::pie(c, layout, config)?),
        Chart::Doughnut(c) => Drawing::Plot(pie::doughnut(c, layout, config)?),
        Chart::Table(t) => Drawing::Table(t.view(config)?),
        Chart::Malformed(m) => {
            return Err(ReportError::InvalidChart {
                kind: m.kind.clone(),
                reason: m.reason.clone(),
            })
        }
    };
    Ok(drawing)
}

/// Create a surface for `chart` and draw into it.
///
/// On error the surface is released again; its id is not reused.
pub fn render_chart(ctx: &mut BuildContext, chart: &Chart, config: &RenderConfig) -> Result<SurfaceId> {
    let id = ctx.create_surface(chart.surface_kind(), chart.layout(config));
    if let Err(e) = redraw(ctx, &id, chart, config) {
        ctx.release(&id);
        return Err(e);
    }
    Ok(id)
}

/// Draw `chart` into an existing surface, replacing its contents.
pub fn redraw(ctx: &mut BuildContext, id: &SurfaceId, chart: &Chart, config: &RenderConfig) -> Result<()> {
    let layout = ctx.layout(id)?;
    let drawing = build_drawing(chart, layout, config)?;
    ctx.draw(id, drawing)
}

pub(crate) fn ensure_drawable(kind: &str, labels: &[String], series: &[&[f64]]) -> Result<()> {
    if labels.is_empty() && series.iter().all(|s| s.is_empty()) {
        return Err(ReportError::EmptyChart(kind.to_string()));
    }
    Ok(())
}

/// Hover text shared by the bar renderers.
pub(crate) fn tooltip(category: &str, series: Option<&str>, display: &str) -> String {
    match series {
        Some(series) => format!("{} | {}: {}", category, series, display),
        None => format!("{}: {}", category, display),
    }
}
