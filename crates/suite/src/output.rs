//! Console output for the suite CLI

use std::path::Path;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use storecheck_report::{group_by_module, ReportPaths, RunSummary, TestResult};

/// Print the end-of-run console summary with the per-module breakdown
pub fn print_run_summary(
    results: &[TestResult],
    total_time: f64,
    reports: &ReportPaths,
    screenshot_dir: &Path,
) {
    let summary = RunSummary::of(results);

    println!();
    println!("🎯 TEST EXECUTION COMPLETE!");
    println!("=================================");
    println!("📊 Total Tests: {}", summary.total);
    println!("✅ Passed: {}", summary.passed.to_string().green());
    println!("❌ Failed: {}", summary.failed.to_string().red());
    println!("📈 Success Rate: {:.1}%", summary.success_rate());
    println!("⏱️  Total Time: {:.2} seconds", total_time);

    if !results.is_empty() {
        println!();
        println!("{}", module_table(results));
    }

    println!("📄 Reports generated:");
    println!("   - {} (Detailed HTML report)", reports.html.display());
    println!("   - {} (Quick text summary)", reports.text.display());
    println!("   - {} (Machine-readable data)", reports.json.display());
    println!(
        "📸 Screenshots saved in '{}' folder",
        screenshot_dir.display()
    );
}

fn module_table(results: &[TestResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Module", "Total", "Passed", "Failed", "Success Rate"]);
    for (module, records) in group_by_module(results) {
        let stats = RunSummary::of(records.iter().copied());
        table.add_row(vec![
            module.to_string(),
            stats.total.to_string(),
            stats.passed.to_string(),
            stats.failed.to_string(),
            format!("{:.1}%", stats.success_rate()),
        ]);
    }
    table
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_table_lists_each_module_once() {
        let results = vec![
            TestResult::pass("Functional Testing", "User Login", "ok"),
            TestResult::fail("Functional Testing", "Add to Cart", "no button"),
            TestResult::pass("Performance", "Homepage Load Time", "1.2s"),
        ];
        let rendered = module_table(&results).to_string();
        assert!(rendered.contains("Functional Testing"));
        assert!(rendered.contains("Performance"));
        assert!(rendered.contains("50.0%"));
        assert!(rendered.contains("100.0%"));
    }
}
