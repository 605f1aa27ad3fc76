//! `price-tracker` library crate.
//!
//! The binary (`tracker`) is a thin wrapper around this library so that:
//!
//! - extraction and analysis are testable without network or processes
//! - the selector chain and analyzers are reusable from other front-ends
//!
//! Core: `extract` (page markup -> price) and `analyze` (history -> trend,
//! statistics, per-entry changes, alerts). Everything else is plumbing.

pub mod analyze;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
