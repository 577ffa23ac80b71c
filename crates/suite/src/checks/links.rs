//! Broken-link scan over the landing page

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use storecheck_report::TestResult;
use storecheck_webdriver::{By, Session};

use crate::config::SuiteConfig;
use crate::error::SuiteResult;

use super::{record_fail, record_pass, start_session};

pub const MODULE: &str = "Broken Links";

/// How many anchors from the landing page get considered
const LINK_SCAN_CAP: usize = 50;

/// Per-link HEAD request deadline
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between probes
const PROBE_DELAY: Duration = Duration::from_millis(500);

/// How many broken links the failure message lists
const REPORTED_LINKS: usize = 5;

pub async fn run(config: &SuiteConfig, endpoint: &str) -> SuiteResult<Vec<TestResult>> {
    let session = start_session(config, endpoint).await?;

    let result = match try_scan(&session, config).await {
        Ok((checked, broken)) if broken.is_empty() => record_pass(
            MODULE,
            "Broken Links Scan",
            format!("Scanned {} links, no broken links found", checked),
        ),
        Ok((_, broken)) => {
            let shown: Vec<&str> = broken
                .iter()
                .take(REPORTED_LINKS)
                .map(String::as_str)
                .collect();
            record_fail(
                MODULE,
                "Broken Links Scan",
                format!("Found {} broken links: {}", broken.len(), shown.join(", ")),
            )
        }
        Err(e) => record_fail(
            MODULE,
            "Broken Links Scan",
            format!("Link scanning failed: {}", e),
        ),
    };

    if let Err(e) = session.quit().await {
        warn!("Session cleanup failed: {}", e);
    }
    Ok(vec![result])
}

/// Probe the first unique links found on the landing page with HEAD requests.
/// Returns how many probes completed and the broken entries; probes that
/// error out are skipped without counting.
async fn try_scan(session: &Session, config: &SuiteConfig) -> SuiteResult<(usize, Vec<String>)> {
    session.navigate(&config.site.base_url).await?;
    let anchors = session.find_elements(&By::tag_name("a")).await?;

    let http = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
    let mut seen = HashSet::new();
    let mut broken = Vec::new();
    let mut checked = 0;

    for anchor in anchors.iter().take(LINK_SCAN_CAP) {
        let raw = match anchor.attribute("href").await {
            Ok(Some(raw)) => raw,
            // Anchors without an href, or gone stale, are skipped
            _ => continue,
        };
        let href = match resolve_href(&config.site.base_url, &raw) {
            Some(href) => href,
            None => continue,
        };
        if !seen.insert(href.clone()) {
            continue;
        }

        match http.head(&href).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if status >= 400 {
                    broken.push(format!("{} (Status: {})", href, status));
                }
                checked += 1;
            }
            Err(e) => {
                debug!("Probe for {} failed: {}", href, e);
            }
        }

        // Be polite to the server
        tokio::time::sleep(PROBE_DELAY).await;
    }

    Ok((checked, broken))
}

/// Resolve a raw href against the page URL. The wire hands back the
/// attribute exactly as written in the markup, so nav links come through as
/// root-relative paths and must be joined before probing. Only http(s) URLs
/// with a host come back; javascript:, mailto: and friends drop out.
fn resolve_href(base: &str, href: &str) -> Option<String> {
    let resolved = reqwest::Url::parse(base).ok()?.join(href).ok()?;
    if matches!(resolved.scheme(), "http" | "https") && resolved.host_str().is_some() {
        Some(resolved.into())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://demo.nopcommerce.com";

    #[test]
    fn test_relative_hrefs_resolve_against_the_page() {
        assert_eq!(
            resolve_href(BASE, "/electronics").as_deref(),
            Some("https://demo.nopcommerce.com/electronics")
        );
        assert_eq!(
            resolve_href(BASE, "cart").as_deref(),
            Some("https://demo.nopcommerce.com/cart")
        );
        assert_eq!(
            resolve_href(BASE, "#reviews").as_deref(),
            Some("https://demo.nopcommerce.com/#reviews")
        );
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(
            resolve_href(BASE, "https://other.example.com/promo").as_deref(),
            Some("https://other.example.com/promo")
        );
        assert_eq!(
            resolve_href(BASE, "http://example.com/").as_deref(),
            Some("http://example.com/")
        );
    }

    #[test]
    fn test_non_http_schemes_are_dropped() {
        assert_eq!(resolve_href(BASE, "mailto:sales@example.com"), None);
        assert_eq!(resolve_href(BASE, "javascript:void(0)"), None);
        assert_eq!(resolve_href(BASE, "tel:+1-555-0100"), None);
    }
}
