//! UI consistency check over the product listing

use tracing::warn;

use storecheck_report::TestResult;
use storecheck_webdriver::Session;

use crate::config::SuiteConfig;
use crate::error::SuiteResult;
use crate::screenshot::ScreenshotCapture;

use super::{fail_with_screenshot, record_fail, record_pass, start_session};

pub const MODULE: &str = "UI Consistency";

/// How many listing cards get inspected
const CARD_SAMPLE: usize = 10;

pub async fn run(config: &SuiteConfig, endpoint: &str) -> SuiteResult<Vec<TestResult>> {
    let session = start_session(config, endpoint).await?;
    let shots = ScreenshotCapture::new(&config.output.screenshot_dir);

    let result = match try_check_cards(&session, config).await {
        Ok((total, inconsistent)) if inconsistent.is_empty() => record_pass(
            MODULE,
            "Product Card Consistency",
            format!("All {} product cards have consistent UI elements", total),
        ),
        Ok((_, inconsistent)) => record_fail(
            MODULE,
            "Product Card Consistency",
            format!("Inconsistent cards found: {}", inconsistent.join(", ")),
        ),
        Err(e) => {
            fail_with_screenshot(
                &session,
                &shots,
                MODULE,
                "Product Card Consistency",
                "ui_consistency_failure",
                format!("UI check failed: {}", e),
            )
            .await
        }
    };

    if let Err(e) = session.quit().await {
        warn!("Session cleanup failed: {}", e);
    }
    Ok(vec![result])
}

/// Inspect the first listing cards for a displayed image, a non-empty title
/// and a non-empty price. Returns the full card count and one entry per card
/// with missing pieces.
async fn try_check_cards(
    session: &Session,
    config: &SuiteConfig,
) -> SuiteResult<(usize, Vec<String>)> {
    let selectors = &config.selectors;
    session.navigate(&config.site.products_url()).await?;

    let cards = session.wait_for_elements(&selectors.product_card).await?;
    let mut inconsistent = Vec::new();

    for (i, card) in cards.iter().take(CARD_SAMPLE).enumerate() {
        let mut missing = Vec::new();

        let image_ok = match card.find_element(&selectors.product_image).await {
            Ok(image) => image.is_displayed().await.unwrap_or(false),
            Err(_) => false,
        };
        if !image_ok {
            missing.push("image");
        }

        let title_ok = match card.find_element(&selectors.product_title).await {
            Ok(title) => !title.text().await.unwrap_or_default().trim().is_empty(),
            Err(_) => false,
        };
        if !title_ok {
            missing.push("title");
        }

        let price_ok = match card.find_element(&selectors.product_price).await {
            Ok(price) => !price.text().await.unwrap_or_default().trim().is_empty(),
            Err(_) => false,
        };
        if !price_ok {
            missing.push("price");
        }

        if !missing.is_empty() {
            inconsistent.push(format!("Product {} missing: {}", i + 1, missing.join(", ")));
        }
    }

    Ok((cards.len(), inconsistent))
}
