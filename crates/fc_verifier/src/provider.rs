//! Replay and authoritative-hash sources.
//!
//! The verifier is the only part of the system that touches the network,
//! so the fetching side is behind traits: HTTP against the recording
//! service in production, an in-memory store for tests and offline CLI
//! verification.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use fc_core::ReplayDocument;

use crate::error::ProviderError;

/// Source of recorded replays.
#[async_trait]
pub trait ReplayProvider: Send + Sync {
    /// Fetch the replay for a match. `Ok(None)` means the recording layer
    /// has no replay for this id - a verdict, not an error.
    async fn fetch_replay(&self, match_id: &str) -> Result<Option<ReplayDocument>, ProviderError>;
}

/// Source of the authoritative result hash (the external source of truth,
/// e.g. the chain recording layer).
#[async_trait]
pub trait AuthorityProvider: Send + Sync {
    async fn fetch_hash(&self, match_id: &str) -> Result<String, ProviderError>;
}

/// HTTP provider with timeout and bounded retry/backoff. Transient
/// failures (transport errors, 5xx) are retried; definitive answers (2xx,
/// 404) are not.
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(ProviderError::from)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            max_retries: 3,
            backoff: Duration::from_millis(200),
        })
    }

    pub fn with_retry(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff = backoff;
        self
    }

    /// GET with retry; `Ok(None)` on 404.
    async fn get_with_retry(&self, url: &str) -> Result<Option<reqwest::Response>, ProviderError> {
        let mut delay = self.backoff;
        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            match self.client.get(url).send().await {
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Ok(None);
                }
                Ok(response) if response.status().is_server_error() => {
                    tracing::debug!(url, status = %response.status(), attempt, "retrying");
                    last_err = Some(ProviderError::Transport(format!(
                        "{url}: server returned {}",
                        response.status()
                    )));
                }
                Ok(response) => {
                    let response = response
                        .error_for_status()
                        .map_err(ProviderError::from)?;
                    return Ok(Some(response));
                }
                Err(err) => {
                    tracing::debug!(url, attempt, error = %err, "retrying");
                    last_err = Some(ProviderError::from(err));
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ProviderError::Transport(format!("{url}: no attempts"))))
    }
}

#[derive(Deserialize)]
struct HashResponse {
    hash: String,
}

#[async_trait]
impl ReplayProvider for HttpProvider {
    async fn fetch_replay(&self, match_id: &str) -> Result<Option<ReplayDocument>, ProviderError> {
        let url = format!("{}/replays/{match_id}", self.base_url);
        match self.get_with_retry(&url).await? {
            Some(response) => {
                let doc = response
                    .json::<ReplayDocument>()
                    .await
                    .map_err(ProviderError::from)?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AuthorityProvider for HttpProvider {
    async fn fetch_hash(&self, match_id: &str) -> Result<String, ProviderError> {
        let url = format!("{}/results/{match_id}/hash", self.base_url);
        match self.get_with_retry(&url).await? {
            Some(response) => {
                let body = response
                    .json::<HashResponse>()
                    .await
                    .map_err(ProviderError::from)?;
                Ok(body.hash)
            }
            None => Err(ProviderError::NotFound(format!("authoritative hash for {match_id}"))),
        }
    }
}

/// In-memory provider for tests and offline verification.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    replays: HashMap<String, ReplayDocument>,
    hashes: HashMap<String, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_replay(&mut self, doc: ReplayDocument) {
        self.replays.insert(doc.match_id.clone(), doc);
    }

    pub fn insert_hash(&mut self, match_id: impl Into<String>, hash: impl Into<String>) {
        self.hashes.insert(match_id.into(), hash.into());
    }
}

#[async_trait]
impl ReplayProvider for MemoryProvider {
    async fn fetch_replay(&self, match_id: &str) -> Result<Option<ReplayDocument>, ProviderError> {
        Ok(self.replays.get(match_id).cloned())
    }
}

#[async_trait]
impl AuthorityProvider for MemoryProvider {
    async fn fetch_hash(&self, match_id: &str) -> Result<String, ProviderError> {
        self.hashes
            .get(match_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("authoritative hash for {match_id}")))
    }
}
