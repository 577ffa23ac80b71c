//! Result records produced by the capability checks

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Binary outcome of one sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl TestStatus {
    pub fn is_pass(self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// One recorded sub-step outcome.
///
/// Records are immutable once constructed; the timestamp is stamped at
/// creation. `screenshot` stays in the JSON dump as an explicit `null` when
/// absent so the dump round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub module: String,
    pub test_name: String,
    pub status: TestStatus,
    pub message: String,
    pub screenshot: Option<String>,
    pub timestamp: String,
}

impl TestResult {
    pub fn pass(
        module: impl Into<String>,
        test_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::record(module, test_name, TestStatus::Pass, message)
    }

    pub fn fail(
        module: impl Into<String>,
        test_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::record(module, test_name, TestStatus::Fail, message)
    }

    /// Attach a failure screenshot path for report embedding
    pub fn with_screenshot(mut self, path: impl Into<String>) -> Self {
        self.screenshot = Some(path.into());
        self
    }

    /// Synthetic record for a check that failed at the module level, so every
    /// executed module contributes at least one record
    pub fn module_failure(module: impl Into<String>, error: impl Into<String>) -> Self {
        Self::fail(module, "Module Execution", error)
    }

    fn record(
        module: impl Into<String>,
        test_name: impl Into<String>,
        status: TestStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            test_name: test_name.into(),
            status,
            message: message.into(),
            screenshot: None,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_pass_record() {
        let result = TestResult::pass("Functional Testing", "User Login", "ok");
        assert_eq!(result.status, TestStatus::Pass);
        assert!(result.screenshot.is_none());
        assert!(NaiveDateTime::parse_from_str(&result.timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_fail_with_screenshot() {
        let result = TestResult::fail("UI Consistency", "Product Cards", "2 missing")
            .with_screenshot("screenshots/ui_consistency_failure_20250101_120000.png");
        assert_eq!(result.status, TestStatus::Fail);
        assert!(result
            .screenshot
            .as_deref()
            .unwrap()
            .starts_with("screenshots/"));
    }

    #[test]
    fn test_module_failure_record() {
        let result = TestResult::module_failure("Broken Links", "session start refused");
        assert_eq!(result.test_name, "Module Execution");
        assert_eq!(result.status, TestStatus::Fail);
        assert_eq!(result.message, "session start refused");
    }

    #[test]
    fn test_status_serialization() {
        let result = TestResult::pass("Performance", "Homepage", "1.2s");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"PASS\""));
        assert!(json.contains("\"screenshot\":null"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TestStatus::Pass.to_string(), "PASS");
        assert_eq!(TestStatus::Fail.to_string(), "FAIL");
    }
}
