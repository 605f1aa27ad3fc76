//! Reporting utilities: per-command views built from analyzer output, and
//! formatted terminal output (`format`).
//!
//! View builders guard the empty-history case themselves: a product whose
//! initial fetch failed is shown as "no data" rather than handed to the
//! analyzer.

use serde::Serialize;

use crate::analyze::{annotate_changes, check_alert, classify_trend, summarize};
use crate::domain::{
    AlertResult, DropThreshold, EntryChange, PriceObservation, Product, StatisticsSummary, Trend, TrendResult,
};
use crate::error::AnalysisError;
use crate::io::store::Catalog;

pub mod format;

pub use format::*;

/// One line of the `list` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub name: String,
    pub latest: Option<f64>,
    pub entries: usize,
    pub trend: Option<Trend>,
}

/// Statistics for one product (`stats`).
#[derive(Debug, Clone, Serialize)]
pub struct ProductStats {
    pub name: String,
    pub url: String,
    pub trend: Trend,
    #[serde(flatten)]
    pub summary: StatisticsSummary,
}

/// Annotated history for one product (`history`).
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub entries: Vec<(PriceObservation, EntryChange)>,
    pub trend: TrendResult,
    /// Overall change and percent, present with two or more entries.
    pub overall: Option<(f64, Option<f64>)>,
}

/// A fired alert for a named product.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub name: String,
    #[serde(flatten)]
    pub result: AlertResult,
}

pub fn list_rows(catalog: &Catalog) -> Result<Vec<ListRow>, AnalysisError> {
    catalog
        .iter()
        .map(|p| {
            let observations = p.prices.observations();
            let trend = if observations.is_empty() {
                None
            } else {
                Some(classify_trend(observations)?.trend)
            };
            Ok(ListRow {
                name: p.name.clone(),
                latest: p.prices.latest().map(|o| o.price),
                entries: observations.len(),
                trend,
            })
        })
        .collect()
}

/// `None` when the product has no observations yet.
pub fn product_stats(product: &Product) -> Result<Option<ProductStats>, AnalysisError> {
    let observations = product.prices.observations();
    if observations.is_empty() {
        return Ok(None);
    }
    Ok(Some(ProductStats {
        name: product.name.clone(),
        url: product.url.clone(),
        trend: classify_trend(observations)?.trend,
        summary: summarize(observations)?,
    }))
}

/// `None` when the product has no observations yet.
pub fn history_view(product: &Product) -> Result<Option<HistoryView>, AnalysisError> {
    let observations = product.prices.observations();
    if observations.is_empty() {
        return Ok(None);
    }

    let trend = classify_trend(observations)?;
    let overall = if observations.len() >= 2 {
        let summary = summarize(observations)?;
        Some((summary.overall_change, summary.overall_change_pct))
    } else {
        None
    };
    let entries = observations
        .iter()
        .copied()
        .zip(annotate_changes(observations))
        .collect();

    Ok(Some(HistoryView { entries, trend, overall }))
}

/// Evaluate the drop alert for every product with at least one observation.
pub fn collect_alerts(catalog: &Catalog, threshold: DropThreshold) -> Result<Vec<Alert>, AnalysisError> {
    let mut alerts = Vec::new();
    for product in catalog.iter().filter(|p| !p.prices.is_empty()) {
        if let Some(result) = check_alert(product.prices.observations(), threshold)? {
            alerts.push(Alert {
                name: product.name.clone(),
                result,
            });
        }
    }
    Ok(alerts)
}
