use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{list::Page, protocol::PaginationEnvelope};
use tracing::debug;

use crate::{error::ListError, query::ComposedQuery};

/// Collection endpoints of the backend.
///
/// `endpoint` is the bare collection name (`"artworks"`); implementations
/// own the URL layout.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(
        &self,
        endpoint: &str,
        query: &ComposedQuery,
    ) -> Result<PaginationEnvelope<serde_json::Value>>;

    /// `PATCH /<endpoint>/<id>/<action>/`
    async fn perform(
        &self,
        endpoint: &str,
        id: &str,
        action: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<()>;

    /// `DELETE /<endpoint>/<id>/`
    async fn delete(&self, endpoint: &str, id: &str) -> Result<()>;
}

pub struct MissingResourceApi;

#[async_trait]
impl ResourceApi for MissingResourceApi {
    async fn list(
        &self,
        endpoint: &str,
        _query: &ComposedQuery,
    ) -> Result<PaginationEnvelope<serde_json::Value>> {
        Err(anyhow!("backend unavailable for {endpoint}"))
    }

    async fn perform(
        &self,
        endpoint: &str,
        id: &str,
        action: &str,
        _payload: Option<serde_json::Value>,
    ) -> Result<()> {
        Err(anyhow!("backend unavailable for {endpoint}/{id}/{action}"))
    }

    async fn delete(&self, endpoint: &str, id: &str) -> Result<()> {
        Err(anyhow!("backend unavailable for {endpoint}/{id}"))
    }
}

/// Issues one list request per call. No retry: a failure is terminal for
/// that attempt.
#[derive(Clone)]
pub struct FetchOrchestrator {
    api: Arc<dyn ResourceApi>,
    endpoint: String,
}

impl FetchOrchestrator {
    pub fn new(api: Arc<dyn ResourceApi>, endpoint: impl Into<String>) -> Self {
        Self {
            api,
            endpoint: endpoint.into(),
        }
    }

    pub fn api(&self) -> &Arc<dyn ResourceApi> {
        &self.api
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        query: &ComposedQuery,
    ) -> std::result::Result<Page<T>, ListError> {
        debug!(
            endpoint = %self.endpoint,
            query = %query.to_query_string(),
            "fetching page"
        );
        let envelope = self
            .api
            .list(&self.endpoint, query)
            .await
            .map_err(ListError::from_transport)?;
        decode_page(&self.endpoint, envelope)
    }
}

/// Decodes the rows of an envelope and checks `results.len() <= count`.
pub fn decode_page<T: DeserializeOwned>(
    resource: &str,
    envelope: PaginationEnvelope<serde_json::Value>,
) -> std::result::Result<Page<T>, ListError> {
    if envelope.results.len() as u64 > envelope.count {
        return Err(ListError::MalformedEnvelope(format!(
            "{} results exceed reported count {}",
            envelope.results.len(),
            envelope.count
        )));
    }

    let items = envelope
        .results
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|err| ListError::Decode {
            resource: resource.to_string(),
            message: err.to_string(),
        })?;

    Ok(Page {
        items,
        total_count: envelope.count,
        has_next: envelope.next.is_some(),
        has_prev: envelope.previous.is_some(),
    })
}

/// Hands out monotonically increasing fetch tokens so that only the response
/// to the most recently issued request is applied.
///
/// A fetch is outstanding from `begin` until its token is settled, either by
/// [`FetchGuard::finish`] or by dropping the guard.
#[derive(Debug, Default)]
pub struct FetchTracker {
    latest: AtomicU64,
    settled: AtomicU64,
}

impl FetchTracker {
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Settles `token`. Returns false when a newer request has been issued
    /// since, in which case the response must be discarded.
    pub fn finish(&self, token: u64) -> bool {
        if token != self.latest() {
            return false;
        }
        self.settled.fetch_max(token, Ordering::SeqCst);
        true
    }

    /// Settles `token` when the returned guard is finished or dropped.
    pub fn guard(&self, token: u64) -> FetchGuard<'_> {
        FetchGuard {
            tracker: self,
            token,
            finished: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.settled.load(Ordering::SeqCst) < self.latest()
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Keeps one fetch token outstanding for as long as it lives.
#[must_use]
pub struct FetchGuard<'a> {
    tracker: &'a FetchTracker,
    token: u64,
    finished: bool,
}

impl FetchGuard<'_> {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// See [`FetchTracker::finish`].
    pub fn finish(mut self) -> bool {
        self.finished = true;
        self.tracker.finish(self.token)
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if !self.finished && self.tracker.finish(self.token) {
            debug!(token = self.token, "list request abandoned before completion");
        }
    }
}
