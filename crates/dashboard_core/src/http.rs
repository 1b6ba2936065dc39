use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    error::{ApiErrorBody, ApiException},
    protocol::PaginationEnvelope,
};
use tracing::warn;

use crate::{fetch::ResourceApi, query::ComposedQuery};

/// [`ResourceApi`] over HTTP against `<base_url>/<resource>/...`.
pub struct HttpResourceApi {
    http: Client,
    base_url: String,
}

impl HttpResourceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, endpoint: &str) -> String {
        format!("{}/{}/", self.base_url, endpoint.trim_matches('/'))
    }

    fn row_url(&self, endpoint: &str, id: &str) -> String {
        format!("{}{id}/", self.collection_url(endpoint))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.json::<ApiErrorBody>().await {
        Ok(body) => body,
        Err(err) => {
            warn!(status = status.as_u16(), error = %err, "unreadable error body");
            ApiErrorBody::default()
        }
    };
    let mut exception = ApiException::from_body(status.as_u16(), &body);
    if body.summary().is_none() {
        exception.message = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    Err(exception.into())
}

#[async_trait]
impl ResourceApi for HttpResourceApi {
    async fn list(
        &self,
        endpoint: &str,
        query: &ComposedQuery,
    ) -> Result<PaginationEnvelope<serde_json::Value>> {
        let response = self
            .http
            .get(self.collection_url(endpoint))
            .query(query.params())
            .send()
            .await?;
        let envelope = ensure_success(response).await?.json().await?;
        Ok(envelope)
    }

    async fn perform(
        &self,
        endpoint: &str,
        id: &str,
        action: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<()> {
        let url = format!("{}{}/", self.row_url(endpoint, id), action.trim_matches('/'));
        let mut request = self.http.patch(url);
        if let Some(payload) = payload {
            request = request.json(&payload);
        }
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, endpoint: &str, id: &str) -> Result<()> {
        let response = self.http.delete(self.row_url(endpoint, id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
