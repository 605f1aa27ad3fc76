//! Domain types used throughout the tracker.
//!
//! This module defines:
//!
//! - persisted shapes (`PriceObservation`, `PriceHistory`, `Product`)
//! - analyzer outputs (`TrendResult`, `StatisticsSummary`, `EntryChange`, `AlertResult`)
//! - boundary-validated inputs (`DropThreshold`)

pub mod types;

pub use types::*;
