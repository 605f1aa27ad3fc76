//! Shared domain types.
//!
//! Observations and histories are the persisted shapes (they round-trip through
//! the tracked-products JSON file). Everything the analyzer produces is derived
//! and recomputed on demand.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One timestamped price reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(rename = "date")]
    pub timestamp: NaiveDateTime,
    pub price: f64,
}

impl PriceObservation {
    pub fn new(timestamp: NaiveDateTime, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Append-only, insertion-ordered sequence of observations for one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceHistory(Vec<PriceObservation>);

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation.
    ///
    /// Histories are chronological by construction (observations are taken at
    /// check time). An older timestamp is still appended, but logged.
    pub fn record(&mut self, observation: PriceObservation) {
        if let Some(last) = self.0.last() {
            if observation.timestamp < last.timestamp {
                tracing::warn!(
                    previous = %last.timestamp,
                    new = %observation.timestamp,
                    "appending observation older than the latest entry"
                );
            }
        }
        self.0.push(observation);
    }

    pub fn observations(&self) -> &[PriceObservation] {
        &self.0
    }

    pub fn latest(&self) -> Option<&PriceObservation> {
        self.0.last()
    }

    /// The observation before the latest one, if any.
    pub fn previous(&self) -> Option<&PriceObservation> {
        self.0.len().checked_sub(2).map(|i| &self.0[i])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A tracked product, as stored in the products file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub url: String,
    pub prices: PriceHistory,
}

impl Product {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            prices: PriceHistory::new(),
        }
    }
}

/// Qualitative direction of recent prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Rising => "Rising",
            Trend::Falling => "Falling",
            Trend::Stable => "Stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trend classification plus the tallies that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendResult {
    pub trend: Trend,
    /// Number of increasing deltas in the window.
    pub up: usize,
    /// Number of decreasing deltas in the window.
    pub down: usize,
    /// Number of deltas considered (including unchanged ones).
    pub deltas: usize,
}

/// A price paired with when it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub price: f64,
    pub at: NaiveDateTime,
}

/// Descriptive statistics over a whole history.
///
/// Percentages are `None` where their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub current: f64,
    pub average: f64,
    pub min: PricePoint,
    pub max: PricePoint,
    pub spread: f64,
    pub spread_pct: Option<f64>,
    pub overall_change: f64,
    pub overall_change_pct: Option<f64>,
    pub volatility_pct: f64,
    pub count: usize,
    pub first_checked: NaiveDateTime,
    pub last_checked: NaiveDateTime,
}

/// Change annotation for one history entry relative to the entry before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryChange {
    Initial,
    NoChange,
    /// `amount` is positive; `pct` is relative to the previous price.
    Up { amount: f64, pct: Option<f64> },
    /// `amount` is positive (the size of the decrease); `pct` is negative.
    Down { amount: f64, pct: Option<f64> },
}

impl fmt::Display for EntryChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryChange::Initial => f.write_str("Initial"),
            EntryChange::NoChange => f.write_str("No change"),
            EntryChange::Up { amount, pct } => {
                write!(f, "UP ${amount:.2}")?;
                if let Some(pct) = pct {
                    write!(f, " ({pct:+.2}%)")?;
                }
                Ok(())
            }
            EntryChange::Down { amount, pct } => {
                write!(f, "DOWN ${amount:.2}")?;
                if let Some(pct) = pct {
                    write!(f, " ({pct:.2}%)")?;
                }
                Ok(())
            }
        }
    }
}

/// Validated percentage-drop threshold for alerts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DropThreshold(f64);

impl DropThreshold {
    /// Accepts finite, non-negative percentages.
    pub fn new(pct: f64) -> Result<Self, crate::error::AnalysisError> {
        if pct.is_finite() && pct >= 0.0 {
            Ok(Self(pct))
        } else {
            Err(crate::error::AnalysisError::InvalidThreshold(pct))
        }
    }

    pub fn pct(self) -> f64 {
        self.0
    }
}

/// A fired price-drop alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertResult {
    pub previous: f64,
    pub current: f64,
    pub drop_amount: f64,
    pub drop_pct: f64,
}
