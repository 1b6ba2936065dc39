use std::collections::{HashSet, VecDeque};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{
    domain::{ApprovalStatus, ArtworkId},
    error::ApiException,
    protocol::{Artwork, PaginationEnvelope},
};
use tokio::{
    sync::{oneshot, Mutex},
    time::Instant,
};

use crate::{fetch::ResourceApi, query::ComposedQuery};

pub(crate) fn artwork(id: i64, title: &str, artist: &str, category: Option<&str>) -> Artwork {
    Artwork {
        id: ArtworkId(id),
        title: title.to_string(),
        artist_name: artist.to_string(),
        category: category.map(str::to_string),
        approval_status: ApprovalStatus::Pending,
        price: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(crate) fn envelope(
    items: &[Artwork],
    count: u64,
    has_next: bool,
    has_prev: bool,
) -> PaginationEnvelope<serde_json::Value> {
    PaginationEnvelope {
        count,
        next: has_next.then(|| "http://api.test/artworks/?page=next".to_string()),
        previous: has_prev.then(|| "http://api.test/artworks/?page=prev".to_string()),
        results: items
            .iter()
            .map(|item| serde_json::to_value(item).expect("encode artwork"))
            .collect(),
    }
}

pub(crate) struct ListReply {
    result: Result<PaginationEnvelope<serde_json::Value>, String>,
    gate: Option<oneshot::Receiver<()>>,
}

impl ListReply {
    pub(crate) fn ok(envelope: PaginationEnvelope<serde_json::Value>) -> Self {
        Self {
            result: Ok(envelope),
            gate: None,
        }
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            gate: None,
        }
    }

    /// Holds the reply back until the returned sender fires.
    pub(crate) fn gated(mut self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.gate = Some(rx);
        (self, tx)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PerformCall {
    pub id: String,
    pub action: String,
    pub payload: Option<serde_json::Value>,
}

/// Scripted in-memory backend that records every request it receives.
#[derive(Default)]
pub(crate) struct FakeApi {
    replies: Mutex<VecDeque<ListReply>>,
    fallback: Mutex<Option<PaginationEnvelope<serde_json::Value>>>,
    pub list_calls: Mutex<Vec<(String, Instant)>>,
    pub perform_calls: Mutex<Vec<PerformCall>>,
    pub delete_calls: Mutex<Vec<String>>,
    failing_ids: Mutex<HashSet<String>>,
}

impl FakeApi {
    pub(crate) fn serving(envelope: PaginationEnvelope<serde_json::Value>) -> Self {
        let api = Self::default();
        *api.fallback.try_lock().expect("fresh lock") = Some(envelope);
        api
    }

    pub(crate) async fn push_reply(&self, reply: ListReply) {
        self.replies.lock().await.push_back(reply);
    }

    pub(crate) async fn set_fallback(&self, envelope: PaginationEnvelope<serde_json::Value>) {
        *self.fallback.lock().await = Some(envelope);
    }

    pub(crate) async fn fail_for(&self, id: &str) {
        self.failing_ids.lock().await.insert(id.to_string());
    }

    pub(crate) async fn list_queries(&self) -> Vec<String> {
        self.list_calls
            .lock()
            .await
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    async fn mutation_result(&self, id: &str) -> Result<()> {
        if self.failing_ids.lock().await.contains(id) {
            return Err(ApiException::new(500, "Server Error").into());
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceApi for FakeApi {
    async fn list(
        &self,
        _endpoint: &str,
        query: &ComposedQuery,
    ) -> Result<PaginationEnvelope<serde_json::Value>> {
        self.list_calls
            .lock()
            .await
            .push((query.to_query_string(), Instant::now()));

        let reply = self.replies.lock().await.pop_front();
        match reply {
            Some(reply) => {
                if let Some(gate) = reply.gate {
                    let _ = gate.await;
                }
                reply.result.map_err(|message| anyhow!(message))
            }
            None => self
                .fallback
                .lock()
                .await
                .clone()
                .ok_or_else(|| anyhow!("no scripted reply")),
        }
    }

    async fn perform(
        &self,
        _endpoint: &str,
        id: &str,
        action: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<()> {
        self.perform_calls.lock().await.push(PerformCall {
            id: id.to_string(),
            action: action.to_string(),
            payload,
        });
        self.mutation_result(id).await
    }

    async fn delete(&self, _endpoint: &str, id: &str) -> Result<()> {
        self.delete_calls.lock().await.push(id.to_string());
        self.mutation_result(id).await
    }
}
