//! Report artifact generation

use std::path::PathBuf;

use tracing::info;

use crate::error::ReportResult;
use crate::html::render_html;
use crate::json::JsonReport;
use crate::record::TestResult;
use crate::text::render_text_summary;

/// Paths of the three artifacts written for a run
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub html: PathBuf,
    pub text: PathBuf,
    pub json: PathBuf,
}

/// Writes the report artifacts for one run into the report directory
pub struct ReportWriter {
    report_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }

    /// Generate all artifacts from one aggregation pass: the HTML report,
    /// then the text summary, then the JSON dump. Write failures are fatal.
    pub fn generate(&self, results: &[TestResult], total_time: f64) -> ReportResult<ReportPaths> {
        std::fs::create_dir_all(&self.report_dir)?;

        let html = self.report_dir.join("test_report.html");
        std::fs::write(&html, render_html(results, total_time))?;
        info!("📊 HTML report generated: {}", html.display());

        let text = self.report_dir.join("test_summary.txt");
        std::fs::write(&text, render_text_summary(results, total_time))?;
        info!("📄 Text summary generated: {}", text.display());

        let json = self.report_dir.join("test_report.json");
        let report = JsonReport::build(results, total_time);
        std::fs::write(&json, serde_json::to_string_pretty(&report)?)?;
        info!("📄 JSON report generated: {}", json.display());

        Ok(ReportPaths { html, text, json })
    }
}
