//! Selector fallback chain.

use scraper::{ElementRef, Html};

use crate::error::ExtractionFailure;
use crate::extract::parse::parse_price;
use crate::extract::profile::SiteProfile;

/// Extract a price from raw page markup.
///
/// Rules are tried in the profile's order. Within a rule, matching elements
/// are tried in document order; elements with empty or unparseable text are
/// skipped. The first parseable fragment wins and no further rules run.
pub fn extract(markup: &str, profile: &SiteProfile) -> Result<f64, ExtractionFailure> {
    let document = Html::parse_document(markup);
    extract_from_document(&document, profile)
}

/// Same as [`extract`] for an already parsed document.
pub fn extract_from_document(document: &Html, profile: &SiteProfile) -> Result<f64, ExtractionFailure> {
    for rule in &profile.rules {
        for element in rule.matcher.find_all(document) {
            let text = element_text(element);
            if text.is_empty() {
                continue;
            }
            match parse_price(&text) {
                Ok(price) => {
                    tracing::debug!(profile = %profile.name, rule = %rule.description, price, "price matched");
                    return Ok(price);
                }
                Err(err) => {
                    tracing::trace!(rule = %rule.description, %err, "skipping fragment");
                }
            }
        }
    }

    tracing::debug!(profile = %profile.name, "no rule produced a price");
    Err(ExtractionFailure::NotFound)
}

/// Descendant text, one space between text nodes and runs of whitespace
/// collapsed. Adjacent nodes never fuse into one number.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::profile::{Matcher, SelectorRule};

    #[test]
    fn generic_match_is_used_when_site_rules_miss() {
        let html = r#"<html><body><div class="product-price">$42.50</div></body></html>"#;
        assert_eq!(extract(html, SiteProfile::amazon()).unwrap(), 42.5);
    }

    #[test]
    fn site_specific_rule_wins_over_generic_rule() {
        let html = r#"
            <div class="price">$99.00</div>
            <span class="a-offscreen">$79.99</span>
        "#;
        assert_eq!(extract(html, SiteProfile::amazon()).unwrap(), 79.99);
        assert_eq!(extract(html, SiteProfile::generic()).unwrap(), 99.0);
    }

    #[test]
    fn amazon_whole_part_spans_nested_decimal() {
        let html = r#"<span class="a-price-whole">1,249<span class="a-price-decimal">.</span></span>"#;
        assert_eq!(extract(html, SiteProfile::amazon()).unwrap(), 1249.0);
    }

    #[test]
    fn currency_variants_extract_identically() {
        for text in ["$1,249.99", "£1249.99", "€1,249.99"] {
            let html = format!(r#"<span id="price">{text}</span>"#);
            assert_eq!(extract(&html, SiteProfile::generic()).unwrap(), 1249.99);
        }
    }

    #[test]
    fn unparseable_matches_fall_through_to_later_elements_and_rules() {
        let html = r#"
            <span class="price-label">Price:</span>
            <span class="price-value">  $ 15.00 </span>
        "#;
        assert_eq!(extract(html, SiteProfile::generic()).unwrap(), 15.0);

        let html = r#"<span class="price">Call us</span><p id="price-now">Only 7.25 today</p>"#;
        assert_eq!(extract(html, SiteProfile::generic()).unwrap(), 7.25);
    }

    #[test]
    fn neighbouring_text_nodes_do_not_fuse() {
        let html = r#"<div class="price"><span class="was">$20.00</span><span class="now">$15.00</span></div>"#;
        assert_eq!(extract(html, SiteProfile::generic()).unwrap(), 20.0);

        let html = r#"<div class="price-box"><h1>Model X</h1><p>$15.00</p></div>"#;
        assert_eq!(extract(html, SiteProfile::generic()).unwrap(), 15.0);
    }

    #[test]
    fn page_without_price_markup_fails() {
        let html = r#"<div><p>Free shipping on orders over 50</p></div><h2>Out of stock</h2>"#;
        assert_eq!(extract(html, SiteProfile::generic()), Err(ExtractionFailure::NotFound));
        let html = r#"<div class="wrap"><h1>Model X200</h1><p>$15.00</p></div>"#;
        assert_eq!(extract(html, SiteProfile::generic()), Err(ExtractionFailure::NotFound));
    }

    #[test]
    fn price_classed_tags_are_the_last_resort() {
        let profile = SiteProfile::new(
            "tags only",
            vec![SelectorRule::new("tags", Matcher::tags_with_class(&["span", "p"], "price"))],
        );
        let html = r#"<p>Order 3 today</p><div class="price">9.00</div><p class="lead price">12.50</p>"#;
        assert_eq!(extract(html, &profile).unwrap(), 12.5);
    }

    #[test]
    fn garbage_without_digits_fails_with_not_found() {
        let html = "<html><body><p>Out of stock</p><span class='price'>N/A</span></body></html>";
        assert_eq!(extract(html, SiteProfile::generic()), Err(ExtractionFailure::NotFound));
        assert_eq!(extract("", SiteProfile::generic()), Err(ExtractionFailure::NotFound));
    }

    #[test]
    fn custom_profile_respects_declared_order() {
        let profile = SiteProfile::new(
            "custom",
            vec![
                SelectorRule::new("sale", Matcher::attribute_contains("data-role", "sale")),
                SelectorRule::new("strong", Matcher::tags_with_class(&["strong"], "cost")),
            ],
        );
        let html = r#"<strong class="cost">10.00</strong><em data-role="sale-now">8.00</em>"#;
        assert_eq!(extract(html, &profile).unwrap(), 8.0);

        let empty = SiteProfile::new("empty", Vec::new());
        assert_eq!(extract(html, &empty), Err(ExtractionFailure::NotFound));
    }
}
