//! Data sources: fetching product pages over HTTP.

pub mod fetch;

pub use fetch::{PageFetcher, PageSource};
