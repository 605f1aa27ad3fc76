//! Export a product's price history to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use crate::analyze::annotate_changes;
use crate::domain::{EntryChange, Product};
use crate::error::{AppError, EXIT_USAGE};

/// Write `date,price,change,change_pct` rows for every observation.
///
/// `change` is signed; both change columns are empty for the first row and
/// `change_pct` is empty when the previous price was zero.
pub fn write_history_csv(path: &Path, product: &Product) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["date", "price", "change", "change_pct"])
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV header: {e}")))?;

    let observations = product.prices.observations();
    for (obs, change) in observations.iter().zip(annotate_changes(observations)) {
        let (delta, pct) = match change {
            EntryChange::Initial => (None, None),
            EntryChange::NoChange => (Some(0.0), Some(0.0)),
            EntryChange::Up { amount, pct } => (Some(amount), pct),
            EntryChange::Down { amount, pct } => (Some(-amount), pct),
        };
        writer
            .write_record([
                obs.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
                format!("{:.2}", obs.price),
                delta.map(|v| format!("{v:.2}")).unwrap_or_default(),
                pct.map(|v| format!("{v:.4}")).unwrap_or_default(),
            ])
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
