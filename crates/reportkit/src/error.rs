use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading a report description or drawing a chart.
///
/// Only the I/O and parse variants escape the assembler; chart-level
/// failures are logged and replaced by a placeholder.
#[derive(Debug)]
pub enum ReportError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Csv { path: PathBuf, source: csv::Error },
    /// A chart has neither labels nor data to draw.
    EmptyChart(String),
    /// A chart entry in the description could not be read.
    InvalidChart { kind: String, reason: String },
    InvalidTable(String),
    UnknownSurface(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ReportError::Json(e) => write!(f, "Invalid report description: {}", e),
            ReportError::Csv { path, source } => {
                write!(f, "Failed to read table data from {}: {}", path.display(), source)
            }
            ReportError::EmptyChart(kind) => write!(f, "Nothing to draw for {} chart", kind),
            ReportError::InvalidChart { kind, reason } => {
                write!(f, "Invalid {} chart description: {}", kind, reason)
            }
            ReportError::InvalidTable(reason) => write!(f, "Invalid table data: {}", reason),
            ReportError::UnknownSurface(id) => write!(f, "No drawing surface with id '{}'", id),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            ReportError::Json(e) => Some(e),
            ReportError::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
