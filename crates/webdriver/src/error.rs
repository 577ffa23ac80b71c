//! Error types for the WebDriver client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebDriverError {
    #[error("WebDriver executable not found: {0}. Install chromedriver or point the suite at a running endpoint")]
    DriverNotFound(String),

    #[error("Driver failed to start: {0}")]
    DriverStartup(String),

    #[error("Driver status check failed after {0} attempts")]
    DriverNotReady(usize),

    #[error("Session could not be created: {0}")]
    SessionCreate(String),

    #[error("No such element: {0}")]
    NoSuchElement(String),

    #[error("WebDriver error [{error}]: {message}")]
    Wire { error: String, message: String },

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Invalid wire response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type WebDriverResult<T> = Result<T, WebDriverError>;
