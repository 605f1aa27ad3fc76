//! Currency-aware parsing of a price text fragment.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractionFailure;

/// Symbols removed before looking for the numeric run.
const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

/// Thousands separator.
const GROUP_SEPARATOR: char = ',';

/// First run of digits with at most one decimal point.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("price pattern is a valid regex"));

/// Parse a text fragment such as `"$1,249.99"` into a price.
///
/// Only the first numeric run is used (`"Was $20, now $15"` parses as `20`).
pub fn parse_price(fragment: &str) -> Result<f64, ExtractionFailure> {
    let cleaned: String = fragment
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != GROUP_SEPARATOR)
        .collect();

    let run = NUMBER
        .find(cleaned.trim())
        .ok_or_else(|| ExtractionFailure::Unparseable(fragment.trim().to_string()))?;

    let value: f64 = run
        .as_str()
        .parse()
        .map_err(|_| ExtractionFailure::Unparseable(fragment.trim().to_string()))?;

    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ExtractionFailure::InvalidValue(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_currency_symbols_and_separators() {
        for text in ["$1,249.99", "£1249.99", "€1,249.99", "  $ 1,249.99 "] {
            assert_eq!(parse_price(text).unwrap(), 1249.99, "input {text:?}");
        }
    }

    #[test]
    fn integer_prices_and_trailing_text() {
        assert_eq!(parse_price("$35").unwrap(), 35.0);
        assert_eq!(parse_price("Now only 19.50 USD").unwrap(), 19.5);
        assert_eq!(parse_price("1,249.").unwrap(), 1249.0);
    }

    #[test]
    fn takes_first_numeric_run() {
        assert_eq!(parse_price("Was $20, now $15").unwrap(), 20.0);
        assert_eq!(parse_price("1.2.3").unwrap(), 1.2);
    }

    #[test]
    fn minus_sign_is_not_part_of_the_price() {
        assert_eq!(parse_price("-$5.00").unwrap(), 5.0);
    }

    #[test]
    fn text_without_digits_is_a_failure() {
        assert_eq!(
            parse_price("See price in cart"),
            Err(ExtractionFailure::Unparseable("See price in cart".to_string()))
        );
        assert!(parse_price("").is_err());
        assert!(parse_price("$.").is_err());
    }

    #[test]
    fn overflowing_digit_run_is_rejected() {
        let huge = "9".repeat(400);
        assert!(matches!(parse_price(&huge), Err(ExtractionFailure::InvalidValue(_))));
    }
}
