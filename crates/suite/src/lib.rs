//! Browser-driven capability checks for one storefront
//!
//! Five checks run strictly in sequence, each in its own browser session:
//! functional flows (login form, search, add to cart), UI consistency of
//! product cards, broken-link scanning, page-load timing, and listing-vs-detail
//! price comparison. Every sub-step yields a PASS/FAIL record; the runner
//! hands the full sequence to the report crate for the persisted artifacts.

pub mod checks;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod screenshot;

pub use config::SuiteConfig;
pub use error::{SuiteError, SuiteResult};
pub use runner::{RunOutcome, SmokeReport, SuiteRunner};
