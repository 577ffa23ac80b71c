//! Error types for the capability suite

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] storecheck_webdriver::WebDriverError),

    #[error("Report error: {0}")]
    Report(#[from] storecheck_report::ReportError),

    /// Check-level failure; the message lands in the FAIL record verbatim
    #[error("{0}")]
    Check(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type SuiteResult<T> = Result<T, SuiteError>;
