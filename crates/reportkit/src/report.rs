//! Report description and builder API.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assembler::ReportAssembler;
use crate::charts::{lenient, Chart};
use crate::config::RenderConfig;
use crate::content::ContentBlock;
use crate::error::{ReportError, Result};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Entries that do not parse are kept as [`Chart::Malformed`].
    #[serde(
        default,
        deserialize_with = "lenient::charts",
        serialize_with = "lenient::serialize_charts"
    )]
    pub charts: Vec<Chart>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn add_chart(&mut self, chart: Chart) {
        self.charts.push(chart);
    }

    pub fn add_content(&mut self, block: ContentBlock) {
        self.content.push(block);
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Trusted HTML shown above the first section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    #[serde(default)]
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            ..Default::default()
        }
    }

    pub fn with_executive_summary(mut self, summary: &str) -> Self {
        self.executive_summary = Some(summary.to_string());
        self
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let report = Self::from_json_str(&json)?;
        log::debug!(
            "[ReportKit::Report] loaded '{}' with {} sections from {}",
            report.title,
            report.sections.len(),
            path.display()
        );
        Ok(report)
    }

    /// Render with the default configuration.
    pub fn render(&self) -> String {
        ReportAssembler::new(RenderConfig::default())
            .assemble(self)
            .into_html()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ReportAssembler::new(RenderConfig::default())
            .assemble(self)
            .save_to_file(path)
    }
}
