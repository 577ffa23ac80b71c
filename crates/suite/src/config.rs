//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use storecheck_webdriver::By;

/// Suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Store under test
    pub site: SiteConfig,

    /// Browser and driver settings
    pub browser: BrowserConfig,

    /// Page-load thresholds
    pub performance: PerformanceConfig,

    /// Artifact directories
    pub output: OutputConfig,

    /// Every locator the checks use
    pub selectors: SelectorConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            browser: BrowserConfig::default(),
            performance: PerformanceConfig::default(),
            output: OutputConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// Store URLs, credentials and test data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Store base URL
    pub base_url: String,

    /// Category listing path
    pub category_path: String,

    /// Known product detail path for the add-to-cart check
    pub product_path: String,

    /// Credentials typed into the login form
    pub test_email: String,
    pub test_password: String,

    /// Query typed into the search box
    pub search_query: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://demo.nopcommerce.com".to_string(),
            category_path: "/electronics".to_string(),
            product_path: "/apple-macbook-pro-13-inch".to_string(),
            test_email: "test@example.com".to_string(),
            test_password: "test123".to_string(),
            search_query: "laptop".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url.trim_end_matches('/'))
    }

    pub fn products_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.category_path)
    }

    pub fn product_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.product_path)
    }
}

/// Browser and driver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Browser window size
    pub window_width: u32,
    pub window_height: u32,

    /// Element-location wait, seconds; also the explicit-wait window
    pub implicit_wait_secs: u64,

    /// Navigation deadline, seconds
    pub page_load_timeout_secs: u64,

    /// Attach to a running WebDriver endpoint instead of spawning one
    pub driver_url: Option<String>,

    /// Driver executable; bare names resolve via PATH
    pub driver_path: PathBuf,

    /// Fixed driver port (None = pick a free port)
    pub driver_port: Option<u16>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            implicit_wait_secs: 10,
            page_load_timeout_secs: 30,
            driver_url: None,
            driver_path: PathBuf::from("chromedriver"),
            driver_port: None,
        }
    }
}

/// Page-load thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Loads at or under this are fully acceptable, seconds
    pub acceptable_load_secs: f64,

    /// Loads over this fail, seconds
    pub max_load_secs: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            acceptable_load_secs: 3.0,
            max_load_secs: 5.0,
        }
    }
}

/// Artifact directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_dir: PathBuf,
    pub screenshot_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("reports"),
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

/// Every locator the checks use, overridable per deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub login_email: By,
    pub login_password: By,
    pub login_button: By,
    pub search_box: By,
    pub search_button: By,
    pub product_card: By,
    pub product_title: By,
    pub product_price: By,
    pub product_image: By,
    /// Tried in order until one yields a displayed element
    pub add_to_cart_candidates: Vec<By>,
    pub attributes_block: By,
    pub detail_price: By,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            login_email: By::id("Email"),
            login_password: By::id("Password"),
            login_button: By::xpath("//button[contains(@class, 'login-button')]"),
            search_box: By::id("small-searchterms"),
            search_button: By::xpath("//button[contains(text(), 'Search')]"),
            product_card: By::class_name("product-item"),
            product_title: By::class_name("product-title"),
            product_price: By::class_name("price"),
            product_image: By::tag_name("img"),
            add_to_cart_candidates: vec![
                By::id("add-to-cart-button"),
                By::name("add-to-cart"),
                By::xpath("//input[@value='Add to cart']"),
                By::xpath("//button[contains(text(), 'Add to cart')]"),
                By::class_name("add-to-cart-button"),
            ],
            attributes_block: By::class_name("attributes"),
            detail_price: By::class_name("price-value"),
        }
    }
}

impl SuiteConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Create the report and screenshot directories
    pub fn setup_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output.report_dir)?;
        std::fs::create_dir_all(&self.output.screenshot_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_urls() {
        let site = SiteConfig::default();
        assert_eq!(site.login_url(), "https://demo.nopcommerce.com/login");
        assert_eq!(site.products_url(), "https://demo.nopcommerce.com/electronics");
        assert_eq!(
            site.product_url(),
            "https://demo.nopcommerce.com/apple-macbook-pro-13-inch"
        );
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        let site = SiteConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(site.login_url(), "http://localhost:8080/login");
    }

    #[test]
    fn test_default_selectors() {
        let selectors = SelectorConfig::default();
        assert_eq!(selectors.login_email, By::id("Email"));
        assert_eq!(selectors.product_card, By::class_name("product-item"));
        assert_eq!(selectors.add_to_cart_candidates.len(), 5);
        assert_eq!(selectors.add_to_cart_candidates[1], By::name("add-to-cart"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SuiteConfig::default();
        let toml_text = toml::to_string_pretty(&config).unwrap();
        assert!(toml_text.contains("by = \"id\""));
        assert!(toml_text.contains("value = \"Email\""));

        let parsed: SuiteConfig = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.site.base_url, config.site.base_url);
        assert_eq!(parsed.selectors.login_email, config.selectors.login_email);
        assert_eq!(
            parsed.selectors.add_to_cart_candidates,
            config.selectors.add_to_cart_candidates
        );
        assert_eq!(parsed.browser.implicit_wait_secs, 10);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SuiteConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.site.base_url, "https://demo.nopcommerce.com");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storecheck.toml");

        let mut config = SuiteConfig::default();
        config.site.base_url = "http://localhost:8080".to_string();
        config.browser.headless = false;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = SuiteConfig::load(&path).unwrap();
        assert_eq!(loaded.site.base_url, "http://localhost:8080");
        assert!(!loaded.browser.headless);
    }
}
