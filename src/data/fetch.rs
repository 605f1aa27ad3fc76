//! Blocking HTTP fetch of product pages.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};

use crate::config::Settings;
use crate::error::FetchError;

/// Anything that can turn a URL into page markup.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl PageSource for PageFetcher {
    /// GET `url` and return the body text.
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "fetching page");

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        resp.text().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}
