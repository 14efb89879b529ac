//! Walks a [`Report`] and produces one self-contained HTML document.
use std::path::Path;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::assets::{COPY_HINT, SCRIPT, STYLESHEET};
use crate::charts::{render_chart, shape_warnings, Chart};
use crate::config::RenderConfig;
use crate::error::{ReportError, Result};
use crate::report::{Report, ReportSection};
use crate::surface::BuildContext;

/// Counts collected during one assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblySummary {
    pub sections: usize,
    pub charts_rendered: usize,
    pub charts_failed: usize,
    pub content_blocks: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub document: Markup,
    pub summary: AssemblySummary,
}

impl RenderedReport {
    pub fn as_html(&self) -> &str {
        &self.document.0
    }

    pub fn into_html(self) -> String {
        self.document.into_string()
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.as_html()).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("[ReportKit::Assembler] report written to {}", path.display());
        Ok(())
    }
}

#[derive(Debug)]
pub struct ReportAssembler {
    ctx: BuildContext,
    config: RenderConfig,
}

impl ReportAssembler {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            ctx: BuildContext::new(),
            config,
        }
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Charts are drawn before content within each section. A chart that
    /// fails is replaced by a placeholder and the rest of the report is kept.
    /// Surfaces are released as soon as their markup is emitted.
    pub fn assemble(&mut self, report: &Report) -> RenderedReport {
        let mut summary = AssemblySummary::default();
        let sections: Vec<Markup> = report
            .sections
            .iter()
            .map(|section| self.section(section, &mut summary))
            .collect();
        summary.sections = sections.len();

        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let document = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (report.title) }
                    style { (PreEscaped(STYLESHEET)) }
                }
                body data-plotly-src=(self.config.plotly_src) {
                    div class="report-container" {
                        header class="report-header" {
                            h1 { (report.title) }
                            @if !report.subtitle.is_empty() {
                                p class="subtitle" { (report.subtitle) }
                            }
                        }
                        @if let Some(exec) = &report.executive_summary {
                            section class="executive-summary" {
                                h2 { "Executive Summary" }
                                div class="summary-body" { (PreEscaped(exec)) }
                            }
                        }
                        @for section in &sections { (section) }
                        @if self.config.show_timestamp {
                            footer class="report-footer" { "Generated " (generated) }
                        }
                    }
                    @if self.config.include_scripts {
                        script { (PreEscaped(SCRIPT)) }
                    }
                }
            }
        };

        log::info!(
            "[ReportKit::Assembler] '{}': {} sections, {} charts ({} failed), {} content blocks",
            report.title,
            summary.sections,
            summary.charts_rendered + summary.charts_failed,
            summary.charts_failed,
            summary.content_blocks
        );
        RenderedReport { document, summary }
    }

    fn section(&mut self, section: &ReportSection, summary: &mut AssemblySummary) -> Markup {
        let id = self.ctx.next_id("section");
        let mut items = Vec::with_capacity(section.charts.len() + section.content.len());
        for chart in &section.charts {
            items.push(self.chart_card(chart, summary));
        }
        for block in &section.content {
            summary.content_blocks += 1;
            items.push(block.render());
        }
        html! {
            section class="report-section" id=(id) {
                h2 { (section.title) }
                @if let Some(sub) = &section.subtitle {
                    p class="section-subtitle" { (sub) }
                }
                div class="section-content" {
                    @for item in &items { (item) }
                }
            }
        }
    }

    fn chart_card(&mut self, chart: &Chart, summary: &mut AssemblySummary) -> Markup {
        for warning in shape_warnings(chart) {
            log::warn!("[ReportKit::Assembler] {}", warning);
            summary.warnings.push(warning);
        }
        let body = render_chart(&mut self.ctx, chart, &self.config).and_then(|id| {
            let markup = self.ctx.render_surface(&id);
            self.ctx.release(&id);
            markup
        });
        let body = match body {
            Ok(markup) => {
                summary.charts_rendered += 1;
                markup
            }
            Err(e) => {
                log::error!("[ReportKit::Assembler] {} chart failed: {}", chart.kind(), e);
                summary.charts_failed += 1;
                html! {
                    div class="chart-error" { "Chart could not be rendered: " (e.to_string()) }
                }
            }
        };
        html! {
            div class="chart-card" data-chart-type=(chart.kind()) {
                @if let Some(title) = chart.title() {
                    h3 class="chart-title" { (title) }
                }
                (body)
                div class="chart-actions" {
                    span class="copy-status" data-idle=(COPY_HINT) { (COPY_HINT) }
                }
            }
        }
    }
}

/// Assemble `report` in a fresh context.
pub fn assemble(report: &Report, config: &RenderConfig) -> RenderedReport {
    ReportAssembler::new(config.clone()).assemble(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartOptions, Dataset, SeriesChart, ValuesChart};
    use crate::content::ContentBlock;

    fn empty_pie() -> Chart {
        Chart::Pie(ValuesChart {
            labels: vec![],
            data: vec![],
            options: ChartOptions::titled("Nothing"),
        })
    }

    fn report_with(charts: Vec<Chart>, content: Vec<ContentBlock>) -> Report {
        let mut section = ReportSection::new("S");
        section.charts = charts;
        section.content = content;
        let mut report = Report::new("Title", "Subtitle");
        report.add_section(section);
        report
    }

    #[test]
    fn failed_chart_becomes_placeholder() {
        let ok = Chart::Grouped(SeriesChart {
            labels: vec!["A".into()],
            datasets: vec![Dataset::new("x", vec![1.0])],
            options: ChartOptions::default(),
        });
        let report = report_with(vec![empty_pie(), ok], vec![ContentBlock::text("after")]);
        let rendered = assemble(&report, &RenderConfig::default());
        assert_eq!(rendered.summary.charts_failed, 1);
        assert_eq!(rendered.summary.charts_rendered, 1);
        assert_eq!(rendered.summary.content_blocks, 1);

        let html = rendered.as_html();
        assert_eq!(html.matches("class=\"chart-error\"").count(), 1);
        assert_eq!(html.matches("class=\"plot-spec\"").count(), 1);
        assert!(html.contains("after"));
    }

    #[test]
    fn malformed_entry_keeps_its_slot() {
        let report = Report::from_json_str(
            r#"{"title": "T", "sections": [{"title": "S", "charts": [
                {"type": "pie", "labels": ["A"], "data": ["not a number"], "options": {"title": "Broken"}},
                {"type": "pie", "labels": ["A", "B"], "data": [1, 2]}
            ], "content": [{"type": "finding", "content": "still here"}]}]}"#,
        )
        .unwrap();
        let rendered = assemble(&report, &RenderConfig::default());
        assert_eq!(rendered.summary.charts_failed, 1);
        assert_eq!(rendered.summary.charts_rendered, 1);

        let html = rendered.as_html();
        let broken = html.find("Broken").unwrap();
        let error = html.find("class=\"chart-error\"").unwrap();
        let plot = html.find("class=\"plot-spec\"").unwrap();
        let finding = html.find("still here").unwrap();
        assert!(broken < error && error < plot && plot < finding);
    }

    #[test]
    fn charts_precede_content_in_section() {
        let pie = Chart::Pie(ValuesChart {
            labels: vec!["A".into(), "B".into()],
            data: vec![1.0, 2.0],
            options: ChartOptions::default(),
        });
        let report = report_with(vec![pie], vec![ContentBlock::finding("Observed")]);
        let html = assemble(&report, &RenderConfig::default()).into_html();
        let plot = html.find("class=\"plot-spec\"").unwrap();
        let finding = html.find("class=\"content-block content-finding\"").unwrap();
        assert!(plot < finding);
    }

    #[test]
    fn scripts_and_timestamp_are_optional() {
        let config = RenderConfig {
            include_scripts: false,
            show_timestamp: false,
            ..Default::default()
        };
        let html = assemble(&Report::new("T", ""), &config).into_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<footer"));
        assert!(!html.contains("class=\"subtitle\""));

        let html = assemble(&Report::new("T", ""), &RenderConfig::default()).into_html();
        assert!(html.contains("<script>"));
        assert!(html.contains("<footer"));
        assert!(html.contains("data-plotly-src=\"https://cdn.plot.ly/"));
    }

    #[test]
    fn shape_mismatch_is_a_warning_not_a_failure() {
        let chart = Chart::MultiColor(ValuesChart {
            labels: vec!["A".into(), "B".into()],
            data: vec![1.0],
            options: ChartOptions::default(),
        });
        let rendered = assemble(&report_with(vec![chart], vec![]), &RenderConfig::default());
        assert_eq!(rendered.summary.warnings.len(), 1);
        assert_eq!(rendered.summary.charts_rendered, 1);
    }

    #[test]
    fn ids_continue_across_reports_in_one_assembler() {
        let mut assembler = ReportAssembler::new(RenderConfig::default());
        let report = report_with(vec![empty_pie()], vec![]);
        assembler.assemble(&report);
        let html = assembler.assemble(&report).into_html();
        assert!(html.contains("id=\"section-3\""));
    }

    #[test]
    fn surfaces_are_released_after_rendering() {
        let pie = Chart::Pie(ValuesChart {
            labels: vec!["A".into(), "B".into()],
            data: vec![1.0, 2.0],
            options: ChartOptions::default(),
        });
        let mut assembler = ReportAssembler::new(RenderConfig::default());
        for _ in 0..3 {
            assembler.assemble(&report_with(vec![pie.clone(), empty_pie()], vec![]));
        }
        assert!(assembler.context().is_empty());
    }
}
