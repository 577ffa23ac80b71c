//! W3C WebDriver client for the storecheck suite
//!
//! Speaks the WebDriver wire protocol (JSON over HTTP) directly:
//! - `DriverProcess` spawns and supervises a local chromedriver
//! - `Session` / `Element` wrap the protocol commands the checks need
//! - `By` translates high-level locator strategies to wire strategies
//! - `Capabilities` assembles the new-session request body
//!
//! The client covers the subset of the protocol the capability checks
//! exercise; it is not a general-purpose binding.

pub mod capabilities;
pub mod driver;
pub mod error;
pub mod locator;
pub mod session;

pub use capabilities::Capabilities;
pub use driver::{DriverConfig, DriverProcess};
pub use error::{WebDriverError, WebDriverResult};
pub use locator::By;
pub use session::{wait_for_ready, Element, Session, Timeouts};
