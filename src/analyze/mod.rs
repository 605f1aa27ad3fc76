//! History analysis: trend, statistics, per-entry changes and alerts.
//!
//! Every function borrows a read-only slice of observations and returns derived
//! values; nothing here mutates or persists a history. An empty slice is a
//! caller bug and is reported as `AnalysisError::EmptyHistory`.

pub mod alert;
pub mod changes;
pub mod stats;
pub mod trend;

pub use alert::check_alert;
pub use changes::{annotate_changes, change_between};
pub use stats::summarize;
pub use trend::{TREND_WINDOW, classify_trend};
