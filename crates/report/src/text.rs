//! Plain-text execution summary

use chrono::Local;

use crate::record::TestResult;
use crate::summary::{group_by_module, RunSummary};

/// Execution time above which the summary carries a performance note, seconds
const SLOW_RUN_SECS: f64 = 120.0;

/// Render the text summary: global counts, per-module breakdown, failed-test
/// details, and a performance insight keyed on total runtime
pub fn render_text_summary(results: &[TestResult], total_time: f64) -> String {
    let summary = RunSummary::of(results);
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut out = String::new();
    out.push_str("\nE-COMMERCE TESTING SUITE - EXECUTION SUMMARY\n");
    out.push_str("============================================\n\n");
    out.push_str(&format!("Execution Date: {}\n", now));
    out.push_str(&format!("Total Duration: {:.2} seconds\n\n", total_time));

    out.push_str("TEST RESULTS SUMMARY:\n");
    out.push_str("====================\n");
    out.push_str(&format!("Total Tests Run: {}\n", summary.total));
    out.push_str(&format!("Tests Passed: {}\n", summary.passed));
    out.push_str(&format!("Tests Failed: {}\n", summary.failed));
    out.push_str(&format!("Success Rate: {:.1}%\n\n", summary.success_rate()));

    out.push_str("DETAILED BREAKDOWN BY MODULE:\n");
    out.push_str("=============================\n");
    for (module, members) in group_by_module(results) {
        let stats = RunSummary::of(members.iter().copied());
        out.push_str(&format!("{}:\n", module));
        out.push_str(&format!("  - Total: {}\n", stats.total));
        out.push_str(&format!("  - Passed: {}\n", stats.passed));
        out.push_str(&format!("  - Failed: {}\n", stats.failed));
        out.push_str(&format!("  - Success Rate: {:.1}%\n\n", stats.success_rate()));
    }

    let failed: Vec<&TestResult> = results.iter().filter(|r| !r.status.is_pass()).collect();
    if !failed.is_empty() {
        out.push_str("FAILED TESTS DETAILS:\n");
        out.push_str("=====================\n");
        for result in failed {
            out.push_str(&format!("- {} ({})\n", result.test_name, result.module));
            out.push_str(&format!("  Reason: {}\n", result.message));
            if let Some(path) = &result.screenshot {
                out.push_str(&format!("  Screenshot: {}\n", path));
            }
            out.push('\n');
        }
    }

    out.push_str("PERFORMANCE INSIGHTS:\n");
    out.push_str("=====================\n");
    out.push_str(&format!("Total execution time: {:.2} seconds\n", total_time));
    if total_time > SLOW_RUN_SECS {
        out.push_str(
            "⚠️  Performance Note: Test execution took more than 2 minutes. Consider optimizing.\n",
        );
    } else {
        out.push_str("✅ Performance: Test execution within acceptable time frame.\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TestResult;

    fn sample() -> Vec<TestResult> {
        vec![
            TestResult::pass("Functional Testing", "User Login", "round-trip ok"),
            TestResult::pass("Functional Testing", "Product Search", "14 products"),
            TestResult::fail("UI Consistency", "Product Cards", "Product 3 missing: price")
                .with_screenshot("screenshots/ui_consistency_failure_20250101_120000.png"),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let text = render_text_summary(&sample(), 42.5);
        assert!(text.contains("Total Tests Run: 3"));
        assert!(text.contains("Tests Passed: 2"));
        assert!(text.contains("Tests Failed: 1"));
        assert!(text.contains("Success Rate: 66.7%"));
        assert!(text.contains("Total Duration: 42.50 seconds"));
    }

    #[test]
    fn test_module_breakdown() {
        let text = render_text_summary(&sample(), 10.0);
        assert!(text.contains("Functional Testing:\n  - Total: 2\n  - Passed: 2"));
        assert!(text.contains("UI Consistency:\n  - Total: 1\n  - Passed: 0"));
    }

    #[test]
    fn test_empty_run_renders_totals_only() {
        let text = render_text_summary(&[], 0.0);
        assert!(text.contains("Total Tests Run: 0"));
        assert!(text.contains("Success Rate: 0.0%"));
        // The breakdown header stays, but no module entry follows it
        assert!(text.contains("DETAILED BREAKDOWN BY MODULE:"));
        assert!(!text.contains("  - Total:"));
        assert!(!text.contains("FAILED TESTS DETAILS"));
    }

    #[test]
    fn test_failed_details_include_screenshot_line() {
        let text = render_text_summary(&sample(), 10.0);
        assert!(text.contains("- Product Cards (UI Consistency)"));
        assert!(text.contains("  Reason: Product 3 missing: price"));
        assert!(text.contains("  Screenshot: screenshots/ui_consistency_failure_20250101_120000.png"));
    }

    #[test]
    fn test_screenshot_line_absent_without_path() {
        let results = vec![TestResult::fail("Performance", "Homepage", "too slow")];
        let text = render_text_summary(&results, 10.0);
        assert!(text.contains("  Reason: too slow"));
        assert!(!text.contains("Screenshot:"));
    }

    #[test]
    fn test_no_failed_section_when_all_pass() {
        let results = vec![TestResult::pass("Performance", "Homepage", "1.1s")];
        let text = render_text_summary(&results, 10.0);
        assert!(!text.contains("FAILED TESTS DETAILS"));
    }

    #[test]
    fn test_performance_note_for_slow_run() {
        let text = render_text_summary(&sample(), 125.0);
        assert!(text.contains("Performance Note: Test execution took more than 2 minutes"));
    }

    #[test]
    fn test_performance_ok_for_fast_run() {
        let text = render_text_summary(&sample(), 60.0);
        assert!(text.contains("Test execution within acceptable time frame"));
    }

    #[test]
    fn test_performance_boundary_is_exclusive() {
        let text = render_text_summary(&sample(), 120.0);
        assert!(text.contains("within acceptable time frame"));
    }
}
