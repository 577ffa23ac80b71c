//! Listing-vs-detail price comparison

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use storecheck_report::TestResult;
use storecheck_webdriver::Session;

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};

use super::{record_fail, record_pass, start_session};

pub const MODULE: &str = "Price Consistency";

/// How many listed products get compared
const PRODUCT_SAMPLE: usize = 3;

/// Tolerated rounding difference between listing and detail prices
const PRICE_EPSILON: f64 = 0.01;

static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d.,]+").expect("valid price pattern"));

pub async fn run(config: &SuiteConfig, endpoint: &str) -> SuiteResult<Vec<TestResult>> {
    let session = start_session(config, endpoint).await?;

    let result = match try_check(&session, config).await {
        Ok(inconsistent) if inconsistent.is_empty() => record_pass(
            MODULE,
            "Price Consistency",
            "All checked products have consistent prices between listing and detail pages"
                .to_string(),
        ),
        Ok(inconsistent) => record_fail(
            MODULE,
            "Price Consistency",
            format!("Price inconsistencies found: {}", inconsistent.join(", ")),
        ),
        Err(e) => record_fail(
            MODULE,
            "Price Consistency",
            format!("Price check failed: {}", e),
        ),
    };

    if let Err(e) = session.quit().await {
        warn!("Session cleanup failed: {}", e);
    }
    Ok(vec![result])
}

/// Compare listing and detail prices for the first listed products. A product
/// whose check errors is skipped after steering the browser back to the
/// listing, so one bad product cannot derail the rest.
async fn try_check(session: &Session, config: &SuiteConfig) -> SuiteResult<Vec<String>> {
    session.navigate(&config.site.products_url()).await?;
    let cards = session
        .wait_for_elements(&config.selectors.product_card)
        .await?;
    let count = cards.len().min(PRODUCT_SAMPLE);

    let mut inconsistent = Vec::new();
    for index in 0..count {
        if let Err(e) = check_product(session, config, index, &mut inconsistent).await {
            debug!("Product {} check skipped: {}", index + 1, e);
            session.navigate(&config.site.products_url()).await?;
        }
    }
    Ok(inconsistent)
}

async fn check_product(
    session: &Session,
    config: &SuiteConfig,
    index: usize,
    inconsistent: &mut Vec<String>,
) -> SuiteResult<()> {
    let selectors = &config.selectors;

    // Card handles from before a detail-page visit are stale; re-query per product
    let cards = session.wait_for_elements(&selectors.product_card).await?;
    let card = cards.get(index).ok_or_else(|| {
        SuiteError::Check(format!(
            "product card {} disappeared from the listing",
            index + 1
        ))
    })?;

    let listing_text = card
        .find_element(&selectors.product_price)
        .await?
        .text()
        .await?;
    let listing_price = extract_price(&listing_text);

    let link = card.find_element(&selectors.product_title).await?;
    let product_name = link.text().await?;
    link.click().await?;

    let detail_text = session
        .wait_for_element(&selectors.detail_price)
        .await?
        .text()
        .await?;
    let detail_price = extract_price(&detail_text);

    if let (Some(listing), Some(detail)) = (listing_price, detail_price) {
        if (listing - detail).abs() > PRICE_EPSILON {
            inconsistent.push(format!(
                "'{}': Listing ${} vs Detail ${}",
                product_name, listing, detail
            ));
        }
    }

    session.back().await?;
    session.wait_for_elements(&selectors.product_card).await?;
    Ok(())
}

/// Pull the first numeric run out of a price string, tolerating currency
/// symbols and thousands separators
fn extract_price(text: &str) -> Option<f64> {
    let m = PRICE_RE.find(text)?;
    m.as_str().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_price_with_currency_and_commas() {
        assert_eq!(extract_price("$1,799.00"), Some(1799.0));
        assert_eq!(extract_price("$1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_extract_price_embedded_in_text() {
        assert_eq!(extract_price("Price: 249.99 USD"), Some(249.99));
    }

    #[test]
    fn test_extract_price_takes_first_run() {
        assert_eq!(extract_price("was 299.00 now 249.00"), Some(299.0));
    }

    #[test]
    fn test_extract_price_without_digits() {
        assert_eq!(extract_price(""), None);
        assert_eq!(extract_price("Call for price"), None);
    }
}
