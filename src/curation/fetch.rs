//! Resilient fetch policy around the shared HTTP client
//!
//! Curation data is an enrichment, not a dependency the pipeline may fail
//! on. Every transport failure is classified and logged here, then surfaced
//! as an outcome the caller can treat as "no data".

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::curation::auth;
use crate::curation::error::FetchError;

/// Transient result of one network attempt.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The endpoint returned a usable payload
    Data(T),
    /// The endpoint had no data for the request
    Empty,
    /// The attempt failed; callers treat this like [`FetchOutcome::Empty`]
    Failed(FetchError),
}

impl<T> FetchOutcome<T> {
    /// Collapses the outcome into optional data, the uniform
    /// degrade-to-empty view providers expose to their callers.
    pub fn into_data(self) -> Option<T> {
        match self {
            FetchOutcome::Data(payload) => Some(payload),
            FetchOutcome::Empty | FetchOutcome::Failed(_) => None,
        }
    }
}

/// HTTP GET wrapper enforcing the configured connect/read timeouts and
/// converting every failure into a classified [`FetchOutcome`].
pub struct ResilientFetch {
    client: reqwest::Client,
}

impl ResilientFetch {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("pkg-curations")
                .connect_timeout(config.connect_timeout())
                .timeout(config.read_timeout())
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchOutcome<T> {
        self.get_json_with_query(url, &[]).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> FetchOutcome<T> {
        let mut request = self.client.get(url);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(credentials) = auth::installed() {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let classified = FetchError::from(err);
                warn!("fetch failed for {}: {}", url, classified);
                return FetchOutcome::Failed(classified);
            }
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("no data at {}", url);
            return FetchOutcome::Empty;
        }

        if !status.is_success() {
            warn!("unexpected status {} from {}", status, url);
            return FetchOutcome::Failed(FetchError::Malformed(format!(
                "unexpected status: {status}"
            )));
        }

        match response.json::<T>().await {
            Ok(payload) => FetchOutcome::Data(payload),
            Err(err) => {
                let classified = FetchError::from(err);
                warn!("unusable response from {}: {}", url, classified);
                FetchOutcome::Failed(classified)
            }
        }
    }
}
