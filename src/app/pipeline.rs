//! Shared "check" pipeline used by `add` and `check`.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> pick site profile -> extract -> append observation
//!
//! The command handlers can then focus on presentation.

use chrono::{Local, NaiveDateTime};

use crate::analyze::change_between;
use crate::data::PageSource;
use crate::domain::{EntryChange, PriceObservation, Product};
use crate::error::ScrapeError;
use crate::extract::{SiteProfile, extract};

/// Fetch `url` and extract its current price.
pub fn scrape_price(source: &dyn PageSource, url: &str) -> Result<f64, ScrapeError> {
    let markup = source.fetch(url)?;
    let profile = SiteProfile::for_url(url);
    let price = extract(&markup, profile)?;
    Ok(price)
}

/// Outcome of checking one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOutcome {
    pub price: f64,
    /// Change relative to the previous observation (`Initial` for the first one).
    pub change: EntryChange,
}

/// Scrape the product's current price and append it to its history.
///
/// On failure the history is left untouched.
pub fn check_product(
    source: &dyn PageSource,
    product: &mut Product,
    now: NaiveDateTime,
) -> Result<CheckOutcome, ScrapeError> {
    let price = scrape_price(source, &product.url)?;
    product.prices.record(PriceObservation::new(now, price));

    let change = match product.prices.previous() {
        Some(previous) => change_between(previous.price, price),
        None => EntryChange::Initial,
    };

    tracing::info!(product = %product.name, price, "recorded price");
    Ok(CheckOutcome { price, change })
}

/// Local wall-clock time, matching the timestamps already in the products file.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::error::{ExtractionFailure, FetchError};

    struct StubPages(HashMap<String, String>);

    impl PageSource for StubPages {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.0.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    fn pages(entries: &[(&str, &str)]) -> StubPages {
        StubPages(entries.iter().map(|(u, b)| (u.to_string(), b.to_string())).collect())
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn amazon_urls_use_amazon_rules() {
        let src = pages(&[(
            "https://www.amazon.com/dp/X",
            r#"<div class="price">$5.00</div><span class="a-offscreen">$4.50</span>"#,
        )]);
        assert_eq!(scrape_price(&src, "https://www.amazon.com/dp/X").unwrap(), 4.5);
    }

    #[test]
    fn check_appends_and_reports_change() {
        let src = pages(&[("https://shop.example/k", r#"<span class="price">$8.00</span>"#)]);
        let mut product = Product::new("Kettle", "https://shop.example/k");

        let first = check_product(&src, &mut product, at(9)).unwrap();
        assert_eq!(first.change, EntryChange::Initial);

        product.prices.record(PriceObservation::new(at(10), 10.0));
        let third = check_product(&src, &mut product, at(11)).unwrap();
        assert_eq!(third.price, 8.0);
        assert_eq!(third.change, EntryChange::Down { amount: 2.0, pct: Some(-20.0) });
        assert_eq!(product.prices.len(), 3);
    }

    #[test]
    fn failures_leave_history_untouched() {
        let src = pages(&[("https://shop.example/none", "<p>Sold out</p>")]);

        let mut missing = Product::new("Missing", "https://shop.example/404");
        assert!(matches!(
            check_product(&src, &mut missing, at(9)),
            Err(ScrapeError::Fetch(FetchError::Status { .. }))
        ));
        assert!(missing.prices.is_empty());

        let mut sold_out = Product::new("Sold out", "https://shop.example/none");
        assert!(matches!(
            check_product(&src, &mut sold_out, at(9)),
            Err(ScrapeError::Extract(ExtractionFailure::NotFound))
        ));
        assert!(sold_out.prices.is_empty());
    }
}
