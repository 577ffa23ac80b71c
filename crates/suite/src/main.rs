//! Storecheck CLI - browser-driven checks against one e-commerce storefront

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storecheck_suite::output::{print_error, print_run_summary};
use storecheck_suite::{SuiteConfig, SuiteRunner};

/// Automated capability checks for a storefront deployment
#[derive(Parser)]
#[command(name = "storecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when absent)
    #[arg(long, default_value = "storecheck.toml", global = true)]
    config: PathBuf,

    /// Override the store base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Attach to a running WebDriver endpoint instead of spawning chromedriver
    #[arg(long, global = true)]
    driver_url: Option<String>,

    /// Run with a visible browser window
    #[arg(long, global = true)]
    headed: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full check suite and write the report artifacts
    Run,

    /// Open the landing page once to verify the browser stack works
    Smoke,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let mut config = SuiteConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.site.base_url = base_url;
    }
    if let Some(driver_url) = cli.driver_url {
        config.browser.driver_url = Some(driver_url);
    }
    if cli.headed {
        config.browser.headless = false;
    }

    let runner = SuiteRunner::new(config).driver_verbose(cli.verbose);

    match cli.command {
        Commands::Run => {
            // FAIL records are the report's business; only infrastructure
            // errors exit non-zero
            let outcome = runner.run().await?;
            print_run_summary(
                &outcome.results,
                outcome.total_time,
                &outcome.reports,
                &runner.config().output.screenshot_dir,
            );
        }
        Commands::Smoke => match runner.smoke().await {
            Ok(report) => {
                println!("📄 Page title: {}", report.title);
                println!("🌐 Current URL: {}", report.url);
                if let Some(path) = report.screenshot {
                    println!("✅ Screenshot saved: {}", path);
                }
                println!("🎉 Smoke test passed! You're ready to run the full suite.");
            }
            Err(e) => {
                print_error(&format!("Smoke test failed: {}", e));
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
