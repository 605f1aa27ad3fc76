//! Per-entry change annotations for history display.

use crate::analyze::stats::percent_of;
use crate::domain::{EntryChange, PriceObservation};

/// Annotate each entry with its change from the previous entry.
///
/// The result has one element per observation; an empty history yields an
/// empty list.
pub fn annotate_changes(history: &[PriceObservation]) -> Vec<EntryChange> {
    let mut out = Vec::with_capacity(history.len());
    if history.is_empty() {
        return out;
    }

    out.push(EntryChange::Initial);
    out.extend(history.windows(2).map(|pair| change_between(pair[0].price, pair[1].price)));
    out
}

/// Change from `previous` to `current`.
pub fn change_between(previous: f64, current: f64) -> EntryChange {
    let delta = current - previous;
    let pct = percent_of(delta, previous);
    if delta > 0.0 {
        EntryChange::Up { amount: delta, pct }
    } else if delta < 0.0 {
        EntryChange::Down { amount: -delta, pct }
    } else {
        EntryChange::NoChange
    }
}
