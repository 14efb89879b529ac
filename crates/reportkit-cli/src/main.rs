use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use reportkit_cli::render::input::RenderInput;
use reportkit_cli::render::run_render;
use reportkit_cli::template::template_json;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("REPORTKIT_LOG", "error,reportkit=info"))
        .init();

    let matches = Command::new("reportkit")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("\u{1F4CA} ReportKit - Declarative HTML reports with plotly charts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render a JSON report description to a self-contained HTML file")
                .arg(
                    Arg::new("description")
                        .help("Path to the JSON report description")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path of the HTML file to write. Defaults to report.html.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("render_config")
                        .short('c')
                        .long("config")
                        .help(
                            "Path to a JSON render configuration (chart sizes, margins, \
                             label thresholds). Missing keys keep their defaults.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("no_scripts")
                        .long("no-scripts")
                        .help("Leave out the chart and clipboard script; charts stay as placeholders.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write the document to stdout instead of a file.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Print an example report description to stdout"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("render", sub_m)) => handle_render(sub_m),
        Some(("template", _)) => {
            println!("{}", template_json()?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_render(matches: &ArgMatches) -> Result<()> {
    let description: &PathBuf = matches
        .get_one("description")
        .ok_or_else(|| anyhow!("missing report description"))?;
    log::info!("[ReportKit::Render] Rendering description: {:?}", description);

    let input = RenderInput::from_arguments(description, matches)?;
    match run_render(&input) {
        Ok(summary) => {
            if !input.to_stdout {
                eprintln!(
                    "[ReportKit::Render] Wrote {} ({} charts, {} failed, {} warnings).",
                    input.output_file.display(),
                    summary.charts_rendered + summary.charts_failed,
                    summary.charts_failed,
                    summary.warnings.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Rendering failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
