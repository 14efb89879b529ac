//! Table "charts": several accepted input shapes, one row model.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use maud::{html, Markup};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::charts::ChartOptions;
use crate::config::RenderConfig;
use crate::error::{ReportError, Result};
use crate::format::format_number;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn from_json(value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Empty,
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Bool(b) => Cell::Text(b.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }

    fn from_field(field: &str) -> Cell {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(field.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Number(_))
    }
}

/// Table input, in any of the accepted shapes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TableData {
    /// `{"labels": [...], "values": [...]}`
    Parallel {
        #[serde(deserialize_with = "crate::charts::lenient::labels")]
        labels: Vec<String>,
        #[serde(alias = "data")]
        values: Vec<Value>,
    },
    /// `{"csv": "path/to/file.csv"}`; the header row names the columns.
    Csv { csv: PathBuf },
    /// `[[label, value], ...]`
    Rows(Vec<Vec<Value>>),
    /// `[{"label": ..., "value": ...}, ...]`
    Records(Vec<Map<String, Value>>),
}

/// Normalised table content, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

fn default_headers(columns: usize) -> Vec<String> {
    (0..columns)
        .map(|i| match i {
            0 => "Label".to_string(),
            1 => "Value".to_string(),
            n => format!("Column {}", n + 1),
        })
        .collect()
}

fn header_from_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pad_rows(rows: &mut [Vec<Cell>], width: usize) {
    for row in rows.iter_mut() {
        row.resize(width, Cell::Empty);
    }
}

impl TableData {
    pub fn to_model(&self, config: &RenderConfig) -> Result<TableModel> {
        let model = match self {
            TableData::Parallel { labels, values } => TableModel {
                headers: default_headers(2),
                rows: labels
                    .iter()
                    .zip(values)
                    .map(|(label, value)| vec![Cell::Text(label.clone()), Cell::from_json(value)])
                    .collect(),
            },
            TableData::Rows(rows) => {
                let width = rows.iter().map(Vec::len).max().unwrap_or(0);
                let mut cells: Vec<Vec<Cell>> = rows
                    .iter()
                    .map(|row| row.iter().map(Cell::from_json).collect())
                    .collect();
                pad_rows(&mut cells, width);
                TableModel {
                    headers: default_headers(width),
                    rows: cells,
                }
            }
            TableData::Records(records) => {
                let mut keys: Vec<String> = Vec::new();
                for key in ["label", "value"] {
                    if records.iter().any(|r| r.contains_key(key)) {
                        keys.push(key.to_string());
                    }
                }
                for record in records {
                    for key in record.keys() {
                        if !keys.contains(key) {
                            keys.push(key.clone());
                        }
                    }
                }
                TableModel {
                    headers: keys.iter().map(|k| header_from_key(k)).collect(),
                    rows: records
                        .iter()
                        .map(|r| {
                            keys.iter()
                                .map(|k| r.get(k).map(Cell::from_json).unwrap_or(Cell::Empty))
                                .collect()
                        })
                        .collect(),
                }
            }
            TableData::Csv { csv } => read_csv_table(&config.resolve_path(csv))?,
        };

        if !model.rows.is_empty() && model.headers.is_empty() {
            return Err(ReportError::InvalidTable("rows have no columns".to_string()));
        }
        Ok(model)
    }
}

fn read_csv_table(path: &Path) -> Result<TableModel> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader.headers().map_err(csv_err)?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(Cell::from_field).collect::<Vec<_>>());
    }
    pad_rows(&mut rows, headers.len());
    log::debug!("[ReportKit::Table] loaded {} rows from {}", rows.len(), path.display());
    Ok(TableModel { headers, rows })
}

/// Per-cell formatter, called with `(cell, row, column)`.
#[derive(Clone)]
pub struct CellFormatter(Arc<dyn Fn(&Cell, usize, usize) -> String + Send + Sync>);

impl CellFormatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Cell, usize, usize) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn format(&self, cell: &Cell, row: usize, column: usize) -> String {
        (self.0)(cell, row, column)
    }
}

impl fmt::Debug for CellFormatter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("CellFormatter(..)")
    }
}

/// Thousands separators for integers, one decimal otherwise, text verbatim.
pub fn default_format(cell: &Cell, _row: usize, _column: usize) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => format_number(*n),
        Cell::Empty => String::new(),
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TableChart {
    pub data: TableData,
    /// Overrides the derived column headers.
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(skip)]
    pub formatter: Option<CellFormatter>,
}

impl TableChart {
    pub fn new(data: TableData) -> Self {
        Self {
            data,
            headers: None,
            options: ChartOptions::default(),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn view(&self, config: &RenderConfig) -> Result<TableView> {
        let model = self.data.to_model(config)?;
        let mut headers = model.headers;
        if let Some(custom) = &self.headers {
            if custom.len() != headers.len() {
                log::warn!(
                    "[ReportKit::Table] {} headers given for {} columns",
                    custom.len(),
                    headers.len()
                );
            }
            for (i, h) in custom.iter().enumerate().take(headers.len()) {
                headers[i] = h.clone();
            }
        }
        let rows = model
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, cell)| ViewCell {
                        text: match &self.formatter {
                            Some(f) => f.format(cell, r, c),
                            None => default_format(cell, r, c),
                        },
                        numeric: cell.is_numeric(),
                    })
                    .collect()
            })
            .collect();
        Ok(TableView {
            headers,
            rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewCell {
    pub text: String,
    pub numeric: bool,
}

/// A formatted table, ready to be placed on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ViewCell>>,
}

impl TableView {
    pub fn row_texts(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }

    pub fn to_html(&self) -> Markup {
        html! {
            table class="report-table" {
                thead {
                    tr { @for h in &self.headers { th { (h) } } }
                }
                tbody {
                    @for row in &self.rows {
                        tr {
                            @for cell in row {
                                td class=[cell.numeric.then_some("num")] { (cell.text) }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view_of(value: Value) -> TableView {
        let data: TableData = serde_json::from_value(value).unwrap();
        TableChart::new(data).view(&RenderConfig::default()).unwrap()
    }

    #[test]
    fn untagged_shapes_are_recognised() {
        let parallel: TableData = serde_json::from_value(json!({"labels": ["a"], "data": [1]})).unwrap();
        assert!(matches!(parallel, TableData::Parallel { .. }));
        let rows: TableData = serde_json::from_value(json!([["a", 1]])).unwrap();
        assert!(matches!(rows, TableData::Rows(_)));
        let records: TableData = serde_json::from_value(json!([{"label": "a", "value": 1}])).unwrap();
        assert!(matches!(records, TableData::Records(_)));
        let csv: TableData = serde_json::from_value(json!({"csv": "t.csv"})).unwrap();
        assert!(matches!(csv, TableData::Csv { .. }));
    }

    #[test]
    fn default_format_groups_and_rounds() {
        let view = view_of(json!([["Revenue", 1234567], ["Margin", 12.345]]));
        assert_eq!(view.row_texts(), vec![vec!["Revenue", "1,234,567"], vec!["Margin", "12.3"]]);
        assert!(view.rows[0][1].numeric);
        assert!(!view.rows[0][0].numeric);
    }

    #[test]
    fn records_keep_extra_columns_in_order() {
        let view = view_of(json!([
            {"label": "a", "value": 1, "note": "x"},
            {"label": "b", "value": 2, "extra": true}
        ]));
        assert_eq!(view.headers, vec!["Label", "Value", "Note", "Extra"]);
        assert_eq!(view.row_texts()[1], vec!["b", "2", "", "true"]);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let view = view_of(json!([["a", 1, 2], ["b"]]));
        assert_eq!(view.headers, vec!["Label", "Value", "Column 3"]);
        assert_eq!(view.row_texts()[1], vec!["b", "", ""]);
    }

    #[test]
    fn custom_formatter_sees_position() {
        let data: TableData = serde_json::from_value(json!([["a", 1], ["b", 2]])).unwrap();
        let chart = TableChart::new(data)
            .with_formatter(CellFormatter::new(|cell, row, col| match (cell, col) {
                (Cell::Number(n), 1) => format!("{}@{}", n, row),
                _ => default_format(cell, row, col),
            }));
        let view = chart.view(&RenderConfig::default()).unwrap();
        assert_eq!(view.row_texts(), vec![vec!["a", "1@0"], vec!["b", "2@1"]]);
    }

    #[test]
    fn csv_source_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.csv"), "Region,Sales\nNorth,1500\nSouth,\n").unwrap();
        let config = RenderConfig {
            base_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let chart = TableChart::new(TableData::Csv { csv: PathBuf::from("t.csv") });
        let view = chart.view(&config).unwrap();
        assert_eq!(view.headers, vec!["Region", "Sales"]);
        assert_eq!(view.row_texts(), vec![vec!["North", "1,500"], vec!["South", ""]]);
    }

    #[test]
    fn missing_csv_is_an_error() {
        let chart = TableChart::new(TableData::Csv { csv: PathBuf::from("/nonexistent/t.csv") });
        assert!(matches!(chart.view(&RenderConfig::default()), Err(ReportError::Csv { .. })));
    }
}
