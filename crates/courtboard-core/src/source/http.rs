//! Document source backed by an HTTP endpoint
//!
//! `GET <base_url>/<collection>` must return the same payload shapes as a
//! JSON export: an array of records or an object keyed by document id.

use super::{records_from_value, DocumentSource};
use crate::error::CoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CoreError::Upstream {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { base_url, client })
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), collection)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, CoreError> {
        let url = self.collection_url(collection);
        tracing::debug!(url = %url, "Fetching collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| CoreError::Upstream {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::UpstreamStatus {
                url,
                status: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|source| CoreError::Upstream {
                url: url.clone(),
                source,
            })?;

        records_from_value(&url, value)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url_joins_cleanly() {
        let source = HttpSource::new("https://api.example.edu/tennis/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            source.collection_url("teams"),
            "https://api.example.edu/tennis/teams"
        );
        assert_eq!(source.describe(), "https://api.example.edu/tennis/");
    }
}
