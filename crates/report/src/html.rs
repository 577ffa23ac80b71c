//! Styled HTML report

use chrono::Local;

use crate::record::{TestResult, TestStatus};
use crate::summary::{group_by_module, RunSummary};

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; }
        .header { background: #2c3e50; color: white; padding: 20px; border-radius: 5px; }
        .summary { background: #ecf0f1; padding: 15px; border-radius: 5px; margin: 20px 0; }
        .test-result { padding: 10px; margin: 10px 0; border-radius: 5px; }
        .pass { background: #d4edda; border: 1px solid #c3e6cb; }
        .fail { background: #f8d7da; border: 1px solid #f5c6cb; }
        .module-header { background: #34495e; color: white; padding: 10px; margin-top: 20px; }
        .screenshot { max-width: 300px; margin: 10px 0; }
        .stats { display: flex; justify-content: space-around; margin: 20px 0; }
        .stat-card { background: white; padding: 15px; border-radius: 5px; text-align: center; flex: 1; margin: 0 10px; }
        .success { border-left: 5px solid #28a745; }
        .warning { border-left: 5px solid #ffc107; }
        .danger { border-left: 5px solid #dc3545; }
"#;

/// Render the full HTML report: header, stat cards, summary block, and one
/// block per record grouped by module in first-seen order
pub fn render_html(results: &[TestResult], total_time: f64) -> String {
    let summary = RunSummary::of(results);
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str("    <title>E-Commerce Test Suite Report</title>\n");
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n");

    out.push_str("    <div class=\"header\">\n");
    out.push_str("        <h1>🛒 E-Commerce Automated Testing Suite Report</h1>\n");
    out.push_str(&format!("        <p>Generated on: {}</p>\n", now));
    out.push_str("    </div>\n\n");

    out.push_str("    <div class=\"stats\">\n");
    push_stat_card(&mut out, "success", "Total Tests", &summary.total.to_string(), None);
    push_stat_card(&mut out, "success", "Passed", &summary.passed.to_string(), Some("#28a745"));
    push_stat_card(&mut out, "danger", "Failed", &summary.failed.to_string(), Some("#dc3545"));
    push_stat_card(
        &mut out,
        "warning",
        "Success Rate",
        &format!("{:.1}%", summary.success_rate()),
        Some("#ffc107"),
    );
    out.push_str("    </div>\n\n");

    out.push_str("    <div class=\"summary\">\n");
    out.push_str("        <h2>📊 Test Summary</h2>\n");
    out.push_str(&format!(
        "        <p><strong>Total Tests:</strong> {}</p>\n",
        summary.total
    ));
    out.push_str(&format!(
        "        <p><strong>Passed:</strong> <span style=\"color: green\">{}</span></p>\n",
        summary.passed
    ));
    out.push_str(&format!(
        "        <p><strong>Failed:</strong> <span style=\"color: red\">{}</span></p>\n",
        summary.failed
    ));
    out.push_str(&format!(
        "        <p><strong>Success Rate:</strong> {:.1}%</p>\n",
        summary.success_rate()
    ));
    out.push_str(&format!(
        "        <p><strong>Total Time:</strong> {:.2} seconds</p>\n",
        total_time
    ));
    out.push_str("    </div>\n\n");

    out.push_str("    <h2>📋 Detailed Test Results</h2>\n");
    for (module, tests) in group_by_module(results) {
        out.push_str(&format!(
            "    <div class=\"module-header\"><h3>{}</h3></div>\n",
            escape(module)
        ));
        for test in tests {
            push_test_block(&mut out, test);
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn push_stat_card(out: &mut String, accent: &str, label: &str, value: &str, color: Option<&str>) {
    let style = match color {
        Some(c) => format!("font-size: 24px; font-weight: bold; color: {};", c),
        None => "font-size: 24px; font-weight: bold;".to_string(),
    };
    out.push_str(&format!(
        "        <div class=\"stat-card {}\">\n            <h3>{}</h3>\n            <p style=\"{}\">{}</p>\n        </div>\n",
        accent, label, style, value
    ));
}

fn push_test_block(out: &mut String, test: &TestResult) {
    let (status_class, status_emoji) = match test.status {
        TestStatus::Pass => ("pass", "✅"),
        TestStatus::Fail => ("fail", "❌"),
    };

    out.push_str(&format!(
        "    <div class=\"test-result {}\">\n",
        status_class
    ));
    out.push_str(&format!(
        "        <h4>{} {}</h4>\n",
        status_emoji,
        escape(&test.test_name)
    ));
    out.push_str(&format!(
        "        <p><strong>Status:</strong> {}</p>\n",
        test.status
    ));
    out.push_str(&format!(
        "        <p><strong>Message:</strong> {}</p>\n",
        escape(&test.message)
    ));
    out.push_str(&format!(
        "        <p><strong>Time:</strong> {}</p>\n",
        escape(&test.timestamp)
    ));

    if let Some(path) = &test.screenshot {
        out.push_str("        <p><strong>Screenshot:</strong></p>\n");
        out.push_str(&format!(
            "        <img src=\"../{}\" alt=\"Failure Screenshot\" class=\"screenshot\">\n",
            escape(path)
        ));
    }

    out.push_str("    </div>\n");
}

/// Minimal HTML escaping for interpolated text
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TestResult;

    fn sample() -> Vec<TestResult> {
        vec![
            TestResult::pass("Functional Testing", "User Login", "round-trip ok"),
            TestResult::fail("UI Consistency", "Product Cards", "Product 3 missing: price")
                .with_screenshot("screenshots/ui_failure.png"),
        ]
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>&"x""#), "&lt;b&gt;&amp;&quot;x&quot;");
    }

    #[test]
    fn test_module_headers_in_first_seen_order() {
        let html = render_html(&sample(), 10.0);
        let functional = html.find("<h3>Functional Testing</h3>").unwrap();
        let ui = html.find("<h3>UI Consistency</h3>").unwrap();
        assert!(functional < ui);
    }

    #[test]
    fn test_status_classes_and_emoji() {
        let html = render_html(&sample(), 10.0);
        assert!(html.contains("test-result pass"));
        assert!(html.contains("✅ User Login"));
        assert!(html.contains("test-result fail"));
        assert!(html.contains("❌ Product Cards"));
    }

    #[test]
    fn test_screenshot_embedded_only_when_present() {
        let html = render_html(&sample(), 10.0);
        assert!(html.contains("<img src=\"../screenshots/ui_failure.png\""));
        assert_eq!(html.matches("<img ").count(), 1);
    }

    #[test]
    fn test_summary_values() {
        let html = render_html(&sample(), 12.345);
        assert!(html.contains("<p><strong>Total Tests:</strong> 2</p>"));
        assert!(html.contains("50.0%"));
        assert!(html.contains("<p><strong>Total Time:</strong> 12.35 seconds</p>"));
    }

    #[test]
    fn test_messages_are_escaped() {
        let results = vec![TestResult::fail(
            "Broken Links",
            "Link Scan",
            "<script>alert(1)</script> & friends",
        )];
        let html = render_html(&results, 1.0);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; friends"));
    }

    #[test]
    fn test_empty_run_renders() {
        let html = render_html(&[], 0.0);
        assert!(html.contains("<p><strong>Total Tests:</strong> 0</p>"));
        assert!(html.contains("0.0%"));
        // The stylesheet mentions the classes; no block should use them
        assert_eq!(html.matches("class=\"module-header\"").count(), 0);
        assert_eq!(html.matches("class=\"test-result").count(), 0);
    }
}
