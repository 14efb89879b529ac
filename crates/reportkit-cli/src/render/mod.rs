pub mod input;

use std::io::Write;

use anyhow::{Context, Result};
use reportkit::{AssemblySummary, Report, ReportAssembler};

use input::RenderInput;

/// Load the description, assemble it and write the document.
pub fn run_render(input: &RenderInput) -> Result<AssemblySummary> {
    let report = Report::from_json_file(&input.description).with_context(|| {
        format!("Failed to load report description: {}", input.description.display())
    })?;
    log::info!(
        "[ReportKit::Render] '{}' with {} sections",
        report.title,
        report.sections.len()
    );

    let mut assembler = ReportAssembler::new(input.config.clone());
    let rendered = assembler.assemble(&report);

    if input.to_stdout {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_html().as_bytes())
            .context("Failed to write report to stdout")?;
        handle.flush()?;
    } else {
        rendered
            .save_to_file(&input.output_file)
            .with_context(|| format!("Failed to write report: {}", input.output_file.display()))?;
    }

    for warning in &rendered.summary.warnings {
        log::warn!("[ReportKit::Render] {}", warning);
    }
    Ok(rendered.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn renders_description_next_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.csv"), "Name,Count\na,1\n").unwrap();
        let description = dir.path().join("report.json");
        std::fs::write(
            &description,
            r#"{"title": "T", "sections": [{"title": "S", "charts": [{"type": "table", "data": {"csv": "t.csv"}}]}]}"#,
        )
        .unwrap();

        let mut input = RenderInput::new(description);
        input.output_file = dir.path().join("out.html");
        let summary = run_render(&input).unwrap();
        assert_eq!(summary.charts_rendered, 1);
        assert_eq!(summary.charts_failed, 0);
        assert!(input.output_file.exists());
    }

    #[test]
    fn missing_description_is_an_error() {
        let input = RenderInput::new(PathBuf::from("/nonexistent/report.json"));
        let err = run_render(&input).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load report description"));
    }
}
