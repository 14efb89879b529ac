use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// plotly.js build fetched by the document script on first use.
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.0.min.js";

/// Space reserved around the plot area of a chart, in pixels.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Rendering parameters shared by every chart of one report.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub chart_width: f64,
    pub chart_height: f64,
    pub pie_size: f64,
    pub margin: Margin,
    /// Share of the whole below which pie slices are left unlabelled.
    pub slice_label_threshold: f64,
    pub default_cutout: f64,
    pub y_ticks: usize,
    /// Without scripts, charts stay as placeholders; tables and text are unaffected.
    pub include_scripts: bool,
    /// Where the document loads plotly.js from.
    pub plotly_src: String,
    pub show_timestamp: bool,
    /// Directory that relative table CSV paths are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chart_width: 720.0,
            chart_height: 360.0,
            pie_size: 320.0,
            margin: Margin::default(),
            slice_label_threshold: 0.05,
            default_cutout: 50.0,
            y_ticks: 5,
            include_scripts: true,
            plotly_src: PLOTLY_JS_URL.to_string(),
            show_timestamp: true,
            base_dir: None,
        }
    }
}

impl RenderConfig {
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Load a render configuration from a JSON file; missing keys keep their defaults.
pub fn load_render_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read render config: {}", path.as_ref().display()))?;
    let config: RenderConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse render config: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: RenderConfig = serde_json::from_str(r#"{"chart_width": 500}"#).unwrap();
        assert_eq!(cfg.chart_width, 500.0);
        assert_eq!(cfg.slice_label_threshold, 0.05);
        assert!(cfg.include_scripts);
        assert_eq!(cfg.plotly_src, PLOTLY_JS_URL);
    }

    #[test]
    fn relative_paths_use_base_dir() {
        let cfg = RenderConfig {
            base_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_path(Path::new("t.csv")), PathBuf::from("/data/t.csv"));
        assert_eq!(cfg.resolve_path(Path::new("/abs/t.csv")), PathBuf::from("/abs/t.csv"));
    }
}
