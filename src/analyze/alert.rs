//! Price-drop alerts between the two most recent observations.

use crate::domain::{AlertResult, DropThreshold, PriceObservation};
use crate::error::AnalysisError;

/// Check whether the latest observation dropped at least `threshold` percent
/// below the one before it.
///
/// Returns `Ok(None)` when there is no alert: fewer than two observations, a
/// previous price of zero, or a drop below the threshold.
pub fn check_alert(
    history: &[PriceObservation],
    threshold: DropThreshold,
) -> Result<Option<AlertResult>, AnalysisError> {
    let [.., previous, current] = history else {
        return if history.is_empty() {
            Err(AnalysisError::EmptyHistory)
        } else {
            Ok(None)
        };
    };

    if previous.price <= 0.0 {
        return Ok(None);
    }

    let drop_amount = previous.price - current.price;
    let drop_pct = drop_amount / previous.price * 100.0;

    if drop_pct >= threshold.pct() {
        Ok(Some(AlertResult {
            previous: previous.price,
            current: current.price,
            drop_amount,
            drop_pct,
        }))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::test_support::history;

    fn threshold(pct: f64) -> DropThreshold {
        DropThreshold::new(pct).unwrap()
    }

    #[test]
    fn boundary_drop_of_twenty_percent() {
        let h = history(&[29.99, 23.99]);

        let fired = check_alert(&h, threshold(20.0)).unwrap().unwrap();
        assert!((fired.drop_pct - 20.0).abs() < 0.01);
        assert!((fired.drop_amount - 6.0).abs() < 1e-9);
        assert_eq!(fired.previous, 29.99);
        assert_eq!(fired.current, 23.99);

        assert!(check_alert(&h, threshold(10.0)).unwrap().is_some());
        assert!(check_alert(&h, threshold(20.01)).unwrap().is_none());
    }

    #[test]
    fn only_the_last_two_observations_matter() {
        // Large drop earlier, small drop at the end.
        let h = history(&[100.0, 50.0, 49.0]);
        assert!(check_alert(&h, threshold(5.0)).unwrap().is_none());
    }

    #[test]
    fn increases_never_alert() {
        let h = history(&[10.0, 12.0]);
        assert!(check_alert(&h, threshold(0.0)).unwrap().is_none());
    }

    #[test]
    fn unchanged_price_meets_zero_threshold() {
        let h = history(&[10.0, 10.0]);
        let fired = check_alert(&h, threshold(0.0)).unwrap().unwrap();
        assert_eq!(fired.drop_pct, 0.0);
    }

    #[test]
    fn degenerate_histories() {
        assert_eq!(check_alert(&[], threshold(5.0)), Err(AnalysisError::EmptyHistory));
        assert_eq!(check_alert(&history(&[10.0]), threshold(5.0)), Ok(None));
        assert_eq!(check_alert(&history(&[0.0, 0.0]), threshold(0.0)), Ok(None));
    }
}
