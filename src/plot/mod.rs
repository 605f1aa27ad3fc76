//! Terminal charts.

pub mod ascii;

pub use ascii::render_price_chart;
