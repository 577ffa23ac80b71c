//! Capability checks
//!
//! Each module opens its own browser session, runs its checks, and returns
//! one record per sub-step. Modules never abort the run: expected failures
//! become FAIL records, and anything that escapes a module is turned into a
//! synthetic record by the runner.

pub mod functional;
pub mod links;
pub mod performance;
pub mod price;
pub mod ui;

use std::time::Duration;

use tracing::{error, info};

use storecheck_report::TestResult;
use storecheck_webdriver::{Capabilities, Session, Timeouts};

use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::screenshot::ScreenshotCapture;

/// Open a browser session configured per the suite settings
pub(crate) async fn start_session(config: &SuiteConfig, endpoint: &str) -> SuiteResult<Session> {
    let caps = Capabilities::chrome()
        .headless(config.browser.headless)
        .window_size(config.browser.window_width, config.browser.window_height);
    let timeouts = Timeouts {
        implicit: Duration::from_secs(config.browser.implicit_wait_secs),
        page_load: Duration::from_secs(config.browser.page_load_timeout_secs),
    };
    Ok(Session::start(endpoint, &caps, timeouts).await?)
}

pub(crate) fn record_pass(module: &str, test_name: &str, message: String) -> TestResult {
    info!("✓ {} - {}", test_name, message);
    TestResult::pass(module, test_name, message)
}

pub(crate) fn record_fail(module: &str, test_name: &str, message: String) -> TestResult {
    error!("✗ {} - {}", test_name, message);
    TestResult::fail(module, test_name, message)
}

/// Record a failure with a best-effort screenshot attached
pub(crate) async fn fail_with_screenshot(
    session: &Session,
    shots: &ScreenshotCapture,
    module: &str,
    test_name: &str,
    slug: &str,
    message: String,
) -> TestResult {
    let result = record_fail(module, test_name, message);
    match shots.capture(session, slug).await {
        Some(path) => result.with_screenshot(path),
        None => result,
    }
}
