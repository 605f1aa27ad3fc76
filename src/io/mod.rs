//! Input/output helpers.
//!
//! - products file load/save (`store`)
//! - history exports (CSV) (`export`)

pub mod export;
pub mod store;

pub use export::*;
pub use store::*;
