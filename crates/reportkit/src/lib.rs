//! reportkit: declarative HTML reports with plotly charts.
//!
//! A [`Report`] describes sections of charts and prose. The
//! [`ReportAssembler`] turns it into one HTML document. Charts are built as
//! `plotly` figures and embedded as JSON; the embedded script loads
//! plotly.js once, on demand, and draws every figure. Tables are normalised
//! from several input shapes, and right-click copies a chart or table to the
//! clipboard.
//!
//! Chart failures never abort a report. They are logged and replaced by a
//! placeholder so the rest of the document still renders.
pub mod assembler;
pub mod assets;
pub mod charts;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod normalize;
pub mod plot;
pub mod report;
pub mod surface;

pub use assembler::{assemble, AssemblySummary, RenderedReport, ReportAssembler};
pub use charts::{Chart, ChartOptions, Dataset, DoughnutChart, SeriesChart, ValuesChart};
pub use config::{load_render_config, RenderConfig};
pub use content::ContentBlock;
pub use error::{ReportError, Result};
pub use plot::PlotSpec;
pub use report::{Report, ReportSection};
