//! Driver process management - spawning and supervising chromedriver

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tracing::info;

use crate::error::{WebDriverError, WebDriverResult};
use crate::session::wait_for_ready;

/// Handle to a chromedriver process owned by this run
pub struct DriverProcess {
    child: Child,
    endpoint: String,
    pub port: u16,
}

impl DriverProcess {
    /// Spawn the driver and wait for its status endpoint to come up
    pub async fn spawn(config: DriverConfig) -> WebDriverResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let endpoint = format!("http://127.0.0.1:{}", port);

        info!("Spawning {} on port {}", config.binary.display(), port);

        let mut cmd = Command::new(&config.binary);
        cmd.args(launch_args(port, config.verbose));
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WebDriverError::DriverNotFound(config.binary.display().to_string())
            } else {
                WebDriverError::DriverStartup(format!("{}: {}", config.binary.display(), e))
            }
        })?;

        let handle = DriverProcess {
            child,
            endpoint: endpoint.clone(),
            port,
        };

        wait_for_ready(&endpoint, config.startup_timeout).await?;

        info!("WebDriver ready at {}", endpoint);
        Ok(handle)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Stop the driver
    pub fn stop(&mut self) -> WebDriverResult<()> {
        info!("Stopping driver (pid: {})", self.child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                // Give it a moment to shut down gracefully
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning a driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Driver executable; bare names resolve via PATH
    pub binary: PathBuf,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    /// Timeout for the status endpoint to report ready
    pub startup_timeout: Duration,

    /// Keep driver logging instead of silencing it
    pub verbose: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("chromedriver"),
            port: None,
            startup_timeout: Duration::from_secs(15),
            verbose: false,
        }
    }
}

fn launch_args(port: u16, verbose: bool) -> Vec<String> {
    vec![
        format!("--port={}", port),
        if verbose { "--verbose" } else { "--silent" }.to_string(),
    ]
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        // Ports should be in valid range
        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(config.binary, PathBuf::from("chromedriver"));
        assert!(config.port.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_launch_args_follow_verbosity() {
        assert_eq!(launch_args(9515, false), vec!["--port=9515", "--silent"]);
        assert_eq!(launch_args(9515, true), vec!["--port=9515", "--verbose"]);
    }
}
