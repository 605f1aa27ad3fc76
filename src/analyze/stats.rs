//! Descriptive statistics over a full price history.

use crate::domain::{PriceObservation, PricePoint, StatisticsSummary};
use crate::error::AnalysisError;

/// Summarize a history.
///
/// Ratios whose denominator is zero (a free item) are reported as `None`
/// rather than dividing by zero; volatility falls back to `0`.
pub fn summarize(history: &[PriceObservation]) -> Result<StatisticsSummary, AnalysisError> {
    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AnalysisError::EmptyHistory),
    };

    let n = history.len() as f64;
    let average = history.iter().map(|o| o.price).sum::<f64>() / n;

    // Strict comparisons keep the earliest occurrence on ties.
    let mut min = PricePoint { price: first.price, at: first.timestamp };
    let mut max = min;
    for obs in &history[1..] {
        if obs.price < min.price {
            min = PricePoint { price: obs.price, at: obs.timestamp };
        }
        if obs.price > max.price {
            max = PricePoint { price: obs.price, at: obs.timestamp };
        }
    }

    let spread = max.price - min.price;
    let overall_change = last.price - first.price;

    Ok(StatisticsSummary {
        current: last.price,
        average,
        min,
        max,
        spread,
        spread_pct: percent_of(spread, min.price),
        overall_change,
        overall_change_pct: percent_of(overall_change, first.price),
        volatility_pct: volatility_pct(history, average),
        count: history.len(),
        first_checked: first.timestamp,
        last_checked: last.timestamp,
    })
}

/// Population standard deviation as a percentage of the average.
fn volatility_pct(history: &[PriceObservation], average: f64) -> f64 {
    if history.len() < 2 || average == 0.0 {
        return 0.0;
    }
    let n = history.len() as f64;
    let variance = history.iter().map(|o| (o.price - average).powi(2)).sum::<f64>() / n;
    variance.sqrt() / average * 100.0
}

/// `value / base * 100`, or `None` when `base` is zero.
pub(crate) fn percent_of(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 { None } else { Some(value / base * 100.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::test_support::{at, history};

    fn round(v: f64, dp: i32) -> f64 {
        let f = 10f64.powi(dp);
        (v * f).round() / f
    }

    #[test]
    fn reference_history_statistics() {
        let h = history(&[249.99, 249.99, 244.99, 239.99]);
        let s = summarize(&h).unwrap();

        assert_eq!(round(s.average, 2), 246.24);
        assert_eq!(s.min.price, 239.99);
        assert_eq!(s.max.price, 249.99);
        assert_eq!(round(s.overall_change, 2), -10.0);
        assert_eq!(round(s.overall_change_pct.unwrap(), 1), -4.0);
        assert_eq!(round(s.spread, 2), 10.0);
        assert_eq!(s.current, 239.99);
        assert_eq!(s.count, 4);
        assert_eq!(s.first_checked, at(0));
        assert_eq!(s.last_checked, at(3));
    }

    #[test]
    fn extrema_keep_first_occurrence() {
        let h = history(&[5.0, 9.0, 5.0, 9.0]);
        let s = summarize(&h).unwrap();
        assert_eq!(s.min.at, at(0));
        assert_eq!(s.max.at, at(1));
    }

    #[test]
    fn volatility_is_population_stddev_over_mean() {
        // mean 10, population stddev 2 -> 20%
        let s = summarize(&history(&[8.0, 12.0, 8.0, 12.0])).unwrap();
        assert!((s.volatility_pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn single_observation() {
        let s = summarize(&history(&[19.99])).unwrap();
        assert_eq!(s.volatility_pct, 0.0);
        assert_eq!(s.spread, 0.0);
        assert_eq!(s.spread_pct, Some(0.0));
        assert_eq!(s.overall_change, 0.0);
        assert_eq!(s.first_checked, s.last_checked);
    }

    #[test]
    fn zero_prices_do_not_divide_by_zero() {
        let s = summarize(&history(&[0.0, 10.0])).unwrap();
        assert_eq!(s.min.price, 0.0);
        assert_eq!(s.spread_pct, None);
        assert_eq!(s.overall_change_pct, None);
        assert!(s.volatility_pct.is_finite());

        let all_free = summarize(&history(&[0.0, 0.0])).unwrap();
        assert_eq!(all_free.volatility_pct, 0.0);
    }

    #[test]
    fn empty_history_is_an_error() {
        assert_eq!(summarize(&[]), Err(AnalysisError::EmptyHistory));
    }
}
