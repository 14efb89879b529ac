use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use reportkit::{load_render_config, RenderConfig};

/// Everything one `render` invocation needs.
#[derive(Debug, Clone)]
pub struct RenderInput {
    pub description: PathBuf,
    pub output_file: PathBuf,
    pub to_stdout: bool,
    pub config: RenderConfig,
}

impl RenderInput {
    pub fn new(description: PathBuf) -> Self {
        let config = RenderConfig {
            base_dir: description.parent().map(PathBuf::from),
            ..Default::default()
        };
        RenderInput {
            description,
            output_file: PathBuf::from("report.html"),
            to_stdout: false,
            config,
        }
    }

    pub fn from_arguments(description: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let mut input = RenderInput::new(description.clone());

        if let Some(config_path) = matches.get_one::<PathBuf>("render_config") {
            input.config = load_render_config(config_path)?;
            // Tables in the description are relative to the description unless the config says otherwise.
            if input.config.base_dir.is_none() {
                input.config.base_dir = description.parent().map(PathBuf::from);
            }
        }

        // Apply CLI overrides
        if let Some(output_file) = matches.get_one::<PathBuf>("output_file") {
            input.output_file = output_file.clone();
        }
        if matches.get_flag("no_scripts") {
            input.config.include_scripts = false;
        }
        if matches.get_flag("stdout") {
            input.to_stdout = true;
        }

        Ok(input)
    }
}
