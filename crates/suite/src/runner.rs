//! Suite orchestration
//!
//! Runs the five capability checks strictly in sequence, each against its own
//! browser session, then writes the report artifacts. Check failures become
//! FAIL records; only infrastructure errors surface as `Err`.

use std::time::{Duration, Instant};

use tracing::{error, info};

use storecheck_report::{ReportPaths, ReportWriter, RunSummary, TestResult};
use storecheck_webdriver::{wait_for_ready, DriverConfig, DriverProcess};

use crate::checks::{self, functional, links, performance, price, ui};
use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::screenshot::ScreenshotCapture;

/// How long to wait for a preconfigured endpoint to answer
const ATTACH_TIMEOUT: Duration = Duration::from_secs(5);

/// Drives the checks in order and writes the report artifacts
pub struct SuiteRunner {
    config: SuiteConfig,
    driver_verbose: bool,
}

/// Everything a caller needs to print the final summary
pub struct RunOutcome {
    pub results: Vec<TestResult>,
    pub total_time: f64,
    pub reports: ReportPaths,
}

/// Outcome of the connectivity smoke check
pub struct SmokeReport {
    pub title: String,
    pub url: String,
    pub screenshot: Option<String>,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            driver_verbose: false,
        }
    }

    /// Pass driver logging through instead of silencing it
    pub fn driver_verbose(mut self, verbose: bool) -> Self {
        self.driver_verbose = verbose;
        self
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub async fn run(&self) -> SuiteResult<RunOutcome> {
        self.config.setup_directories()?;
        let started = Instant::now();

        let (endpoint, driver) = self.resolve_endpoint().await?;

        info!("🚀 Starting E-Commerce Automated Testing Suite...");

        let mut results = Vec::new();

        info!("");
        info!("🔧 Running Functional Tests...");
        absorb(
            &mut results,
            functional::MODULE,
            functional::run(&self.config, &endpoint).await,
        );

        info!("");
        info!("🎨 Running UI Consistency Tests...");
        absorb(
            &mut results,
            ui::MODULE,
            ui::run(&self.config, &endpoint).await,
        );

        info!("");
        info!("🔗 Running Broken Links Detection...");
        absorb(
            &mut results,
            links::MODULE,
            links::run(&self.config, &endpoint).await,
        );

        info!("");
        info!("⚡ Running Performance Tests...");
        absorb(
            &mut results,
            performance::MODULE,
            performance::run(&self.config, &endpoint).await,
        );

        info!("");
        info!("💰 Running Price Consistency Tests...");
        absorb(
            &mut results,
            price::MODULE,
            price::run(&self.config, &endpoint).await,
        );

        if let Some(mut driver) = driver {
            driver.stop()?;
        }

        let total_time = started.elapsed().as_secs_f64();
        let summary = RunSummary::of(&results);
        info!("");
        info!(
            "Test Results: {} passed, {} failed ({:.2}s)",
            summary.passed, summary.failed, total_time
        );

        let reports =
            ReportWriter::new(&self.config.output.report_dir).generate(&results, total_time)?;

        Ok(RunOutcome {
            results,
            total_time,
            reports,
        })
    }

    /// Open the landing page once to prove the browser stack works
    pub async fn smoke(&self) -> SuiteResult<SmokeReport> {
        self.config.setup_directories()?;
        let (endpoint, driver) = self.resolve_endpoint().await?;

        let session = checks::start_session(&self.config, &endpoint).await?;
        let shots = ScreenshotCapture::new(&self.config.output.screenshot_dir);

        info!("🌐 Opening: {}", self.config.site.base_url);
        session.navigate(&self.config.site.base_url).await?;
        let title = session.title().await?;
        let url = session.current_url().await?;
        let screenshot = shots.capture(&session, "smoke_test").await;

        session.quit().await?;
        if let Some(mut driver) = driver {
            driver.stop()?;
        }

        Ok(SmokeReport {
            title,
            url,
            screenshot,
        })
    }

    /// Attach to a configured WebDriver endpoint or spawn our own driver
    async fn resolve_endpoint(&self) -> SuiteResult<(String, Option<DriverProcess>)> {
        if let Some(url) = &self.config.browser.driver_url {
            let url = url.trim_end_matches('/').to_string();
            wait_for_ready(&url, ATTACH_TIMEOUT).await?;
            info!("Using WebDriver at {}", url);
            return Ok((url, None));
        }

        let driver = DriverProcess::spawn(DriverConfig {
            binary: self.config.browser.driver_path.clone(),
            port: self.config.browser.driver_port,
            verbose: self.driver_verbose,
            ..DriverConfig::default()
        })
        .await?;
        Ok((driver.endpoint().to_string(), Some(driver)))
    }
}

/// Fold one module's outcome into the record sequence. A module-level error
/// still contributes a FAIL record, so every executed module shows up in the
/// report.
fn absorb(results: &mut Vec<TestResult>, module: &str, outcome: SuiteResult<Vec<TestResult>>) {
    match outcome {
        Ok(records) => results.extend(records),
        Err(e) => {
            error!("✗ {} - {}", module, e);
            results.push(TestResult::module_failure(module, e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SuiteError;
    use storecheck_report::TestStatus;

    #[test]
    fn test_absorb_extends_on_success() {
        let mut results = Vec::new();
        absorb(
            &mut results,
            "Performance",
            Ok(vec![
                TestResult::pass("Performance", "Homepage Load Time", "1.2s"),
                TestResult::fail("Performance", "Login Page Load Time", "6.0s"),
            ]),
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, TestStatus::Pass);
    }

    #[test]
    fn test_absorb_synthesizes_module_failure() {
        let mut results = Vec::new();
        absorb(
            &mut results,
            "Broken Links",
            Err(SuiteError::Check("session start refused".to_string())),
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].module, "Broken Links");
        assert_eq!(results[0].test_name, "Module Execution");
        assert_eq!(results[0].status, TestStatus::Fail);
        assert_eq!(results[0].message, "session start refused");
    }

    #[test]
    fn test_driver_verbose_defaults_off() {
        let runner = SuiteRunner::new(SuiteConfig::default());
        assert!(!runner.driver_verbose);

        let runner = runner.driver_verbose(true);
        assert!(runner.driver_verbose);
    }
}
