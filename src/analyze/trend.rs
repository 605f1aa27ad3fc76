//! Trend classification over the most recent observations.

use std::cmp::Ordering;

use crate::domain::{PriceObservation, Trend, TrendResult};
use crate::error::AnalysisError;

/// Number of trailing points considered (three consecutive deltas).
pub const TREND_WINDOW: usize = 4;

/// Classify the recent direction of a history.
///
/// Looks at up to the last [`TREND_WINDOW`] points, tallies increasing and
/// decreasing deltas (unchanged deltas count for neither) and picks the
/// majority. Ties, including a flat window or a single point, are `Stable`.
pub fn classify_trend(history: &[PriceObservation]) -> Result<TrendResult, AnalysisError> {
    if history.is_empty() {
        return Err(AnalysisError::EmptyHistory);
    }

    let start = history.len().saturating_sub(TREND_WINDOW);
    let window = &history[start..];

    let mut up = 0;
    let mut down = 0;
    for pair in window.windows(2) {
        match pair[1].price.partial_cmp(&pair[0].price) {
            Some(Ordering::Greater) => up += 1,
            Some(Ordering::Less) => down += 1,
            _ => {}
        }
    }

    let trend = match up.cmp(&down) {
        Ordering::Greater => Trend::Rising,
        Ordering::Less => Trend::Falling,
        Ordering::Equal => Trend::Stable,
    };

    Ok(TrendResult {
        trend,
        up,
        down,
        deltas: window.len() - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::test_support::history;

    #[test]
    fn flat_window_is_stable() {
        let r = classify_trend(&history(&[10.0, 10.0, 10.0, 10.0])).unwrap();
        assert_eq!(r.trend, Trend::Stable);
        assert_eq!((r.up, r.down, r.deltas), (0, 0, 3));
    }

    #[test]
    fn two_up_one_down_is_rising() {
        let r = classify_trend(&history(&[100.0, 105.0, 110.0, 108.0])).unwrap();
        assert_eq!(r.trend, Trend::Rising);
        assert_eq!((r.up, r.down), (2, 1));
    }

    #[test]
    fn single_point_is_stable_with_no_deltas() {
        let r = classify_trend(&history(&[42.0])).unwrap();
        assert_eq!(r.trend, Trend::Stable);
        assert_eq!((r.up, r.down, r.deltas), (0, 0, 0));
    }

    #[test]
    fn only_the_last_three_deltas_count() {
        // Early rises are outside the window.
        let r = classify_trend(&history(&[1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 2.0])).unwrap();
        assert_eq!(r.trend, Trend::Falling);
        assert_eq!((r.up, r.down, r.deltas), (0, 2, 3));
    }

    #[test]
    fn short_histories_use_all_transitions() {
        assert_eq!(classify_trend(&history(&[5.0, 4.0])).unwrap().trend, Trend::Falling);
        assert_eq!(classify_trend(&history(&[5.0, 6.0, 5.0])).unwrap().trend, Trend::Stable);
    }

    #[test]
    fn empty_history_is_an_error() {
        assert_eq!(classify_trend(&[]), Err(AnalysisError::EmptyHistory));
    }
}
