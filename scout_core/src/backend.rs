//! Access to the remote search backend.
//!
//! The backend exposes two operations: the primary `ask-ai` search that
//! returns query rewrites plus web and video results, and `get_results`,
//! which returns the stored, ranked consolidation for a query.

use crate::config::ClientConfig;
use crate::error::{BackendError, ConfigError};
use crate::types::{AskAiResponse, Query, RankedResultItem};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, trace};
use url::Url;

const ASK_AI_PATH: &str = "ask-ai/";
const RANKED_RESULTS_PATH: &str = "get_results/";

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Primary search: alternative queries, web results and video results.
    async fn ask_ai(&self, query: &Query) -> Result<AskAiResponse, BackendError>;

    /// Stored results for `query`, ordered by rank score.
    async fn ranked_results(&self, query: &Query) -> Result<Vec<RankedResultItem>, BackendError>;
}

/// [`SearchBackend`] over HTTP.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let mut builder =
            Client::builder().user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Read the body, map non-2xx statuses, and decode.
    ///
    /// Empty and `null` bodies decode to `None`.
    async fn read_json<T: DeserializeOwned>(
        endpoint: &Url,
        started: Instant,
        resp: reqwest::Response,
    ) -> Result<Option<T>, BackendError> {
        let status = resp.status();
        let body = resp.text().await?;
        debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend response"
        );

        if !status.is_success() {
            return Err(BackendError::from_status(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<T>>(&body)?)
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn ask_ai(&self, query: &Query) -> Result<AskAiResponse, BackendError> {
        let endpoint = self.endpoint(ASK_AI_PATH)?;
        trace!(endpoint = %endpoint, query = %query, "POST ask-ai");
        let started = Instant::now();

        let resp = self
            .client
            .post(endpoint.clone())
            .json(&json!({ "query": query.as_str() }))
            .send()
            .await?;

        Ok(Self::read_json::<AskAiResponse>(&endpoint, started, resp)
            .await?
            .unwrap_or_default())
    }

    async fn ranked_results(&self, query: &Query) -> Result<Vec<RankedResultItem>, BackendError> {
        let endpoint = self.endpoint(RANKED_RESULTS_PATH)?;
        trace!(endpoint = %endpoint, query = %query, "GET get_results");
        let started = Instant::now();

        let resp = self
            .client
            .get(endpoint.clone())
            .query(&[("query", query.as_str())])
            .send()
            .await?;

        Ok(Self::read_json::<Vec<RankedResultItem>>(&endpoint, started, resp)
            .await?
            .unwrap_or_default())
    }
}
