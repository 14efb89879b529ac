//! Example description printed by `reportkit template`.
use anyhow::Result;
use reportkit::charts::{TableChart, TableData};
use reportkit::{
    Chart, ChartOptions, ContentBlock, Dataset, DoughnutChart, Report, ReportSection, SeriesChart,
    ValuesChart,
};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn example_report() -> Report {
    let mut report = Report::new("Quarterly Business Review", "Q3 results")
        .with_executive_summary("<p>Revenue grew <strong>12%</strong> quarter over quarter.</p>");

    let mut overview = ReportSection::new("Overview");
    overview.add_chart(Chart::Grouped(SeriesChart {
        labels: labels(&["North", "South", "East", "West"]),
        datasets: vec![
            Dataset::new("Q2", vec![120.0, 95.0, 80.0, 60.0]),
            Dataset::new("Q3", vec![135.0, 101.0, 92.0, 58.0]),
        ],
        options: ChartOptions {
            y_axis_title: Some("Revenue (k USD)".to_string()),
            ..ChartOptions::titled("Revenue by region")
        },
    }));
    overview.add_chart(Chart::Pie(ValuesChart {
        labels: labels(&["Product", "Services", "Support"]),
        data: vec![45.0, 35.0, 20.0],
        options: ChartOptions::titled("Revenue mix"),
    }));
    overview.add_content(ContentBlock::finding("North remains the largest region."));
    report.add_section(overview);

    let mut detail = ReportSection::new("Detail").with_subtitle("Mixed units per metric");
    detail.add_chart(Chart::MultiScale(SeriesChart {
        labels: labels(&["Revenue", "Headcount", "Margin"]),
        datasets: vec![
            Dataset::new("Q2", vec![355_000.0, 42.0, -1.5]),
            Dataset::new("Q3", vec![386_000.0, 45.0, 3.2]),
        ],
        options: ChartOptions::titled("Quarter over quarter"),
    }));
    detail.add_chart(Chart::Doughnut(DoughnutChart {
        labels: labels(&["Male", "Female"]),
        data: vec![52.0, 48.0],
        cutout: Some(55.0),
        options: ChartOptions::titled("Team composition"),
    }));
    detail.add_chart(Chart::Table(TableChart {
        options: ChartOptions::titled("Top accounts"),
        ..TableChart::new(TableData::Parallel {
            labels: labels(&["Acme", "Globex", "Initech"]),
            values: vec![1_250_000.into(), 980_500.into(), 412_000.into()],
        })
    }));
    detail.add_content(ContentBlock::recommendation(
        "Hire two account managers for the East region.",
        Some("high"),
    ));
    report.add_section(detail);

    report
}

pub fn template_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&example_report())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back() {
        let json = template_json().unwrap();
        let report = Report::from_json_str(&json).unwrap();
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[1].charts.len(), 3);
        assert!(json.contains("\"type\": \"multiScale\""));
    }
}
