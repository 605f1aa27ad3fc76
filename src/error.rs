//! Error types.
//!
//! The core (extraction + analysis) and the collaborators (fetch, store) each
//! have a small typed error enum. Command handlers convert them into
//! [`AppError`], which carries the process exit code.

use thiserror::Error;

/// Exit code for usage, configuration and file I/O problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for unknown or duplicate products.
pub const EXIT_PRODUCT: u8 = 3;
/// Exit code for data-integrity violations (e.g. analytics on an empty history).
pub const EXIT_DATA: u8 = 4;

/// The extractor could not produce a price.
///
/// Recoverable: the caller may try another profile or skip the check cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionFailure {
    #[error("price not found on page")]
    NotFound,

    #[error("no numeric price in text '{0}'")]
    Unparseable(String),

    #[error("price {0} is not a non-negative number")]
    InvalidValue(f64),
}

/// Precondition or boundary violations for the history analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("price history is empty")]
    EmptyHistory,

    #[error("alert threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
}

/// Transport-level failure from the fetch layer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: reqwest::StatusCode },
}

/// Fetch + extract failed for a product URL.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractionFailure),
}

/// Repository (JSON file) failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode products: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("product '{0}' already exists")]
    Duplicate(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let code = match err {
            AnalysisError::EmptyHistory => EXIT_DATA,
            AnalysisError::InvalidThreshold(_) => EXIT_USAGE,
        };
        AppError::new(code, format!("Error: {err}"))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::Duplicate(_) => EXIT_PRODUCT,
            StoreError::Io { .. } | StoreError::Encode(_) => EXIT_USAGE,
        };
        AppError::new(code, format!("Error: {err}"))
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(EXIT_USAGE, format!("Error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_errors_map_to_distinct_exit_codes() {
        let empty: AppError = AnalysisError::EmptyHistory.into();
        let threshold: AppError = AnalysisError::InvalidThreshold(-1.0).into();
        assert_eq!(empty.exit_code(), EXIT_DATA);
        assert_eq!(threshold.exit_code(), EXIT_USAGE);
        assert!(threshold.to_string().contains("-1"));
    }

    #[test]
    fn duplicate_product_is_a_product_error() {
        let err: AppError = StoreError::Duplicate("Widget".to_string()).into();
        assert_eq!(err.exit_code(), EXIT_PRODUCT);
        assert_eq!(err.to_string(), "Error: product 'Widget' already exists");
    }
}
