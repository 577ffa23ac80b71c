//! Failure screenshot capture

use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, warn};

use storecheck_webdriver::Session;

/// Writes timestamped PNG screenshots into the configured directory.
///
/// Capture failures are logged and swallowed; they never change a
/// check's recorded outcome.
pub struct ScreenshotCapture {
    dir: PathBuf,
}

impl ScreenshotCapture {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Capture the current page, returning the stored path on success.
    pub async fn capture(&self, session: &Session, slug: &str) -> Option<String> {
        match self.try_capture(session, slug).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not capture screenshot '{}': {}", slug, e);
                None
            }
        }
    }

    async fn try_capture(
        &self,
        session: &Session,
        slug: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename(slug));
        let png = session.screenshot_png().await?;
        std::fs::write(&path, png)?;
        debug!("Screenshot saved: {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }
}

fn filename(slug: &str) -> String {
    format!("{}_{}.png", slug, Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_shape() {
        let name = filename("login_failure");
        let re = regex::Regex::new(r"^login_failure_\d{8}_\d{6}\.png$").unwrap();
        assert!(re.is_match(&name), "unexpected filename: {}", name);
    }
}
