use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend on non-2xx responses.
///
/// Collection endpoints answer with `{"detail": "..."}`; validation failures
/// instead map field names to message lists, which land in `fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ApiErrorBody {
    /// Human-readable summary of the body, if it carried anything.
    pub fn summary(&self) -> Option<String> {
        if let Some(detail) = &self.detail {
            return Some(detail.clone());
        }
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, value)| match value {
                serde_json::Value::Array(items) => {
                    let joined = items
                        .iter()
                        .map(|item| {
                            item.as_str()
                                .map(str::to_string)
                                .unwrap_or_else(|| item.to_string())
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!("{field}: {joined}")
                }
                serde_json::Value::String(text) => format!("{field}: {text}"),
                other => format!("{field}: {other}"),
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn from_body(status: u16, body: &ApiErrorBody) -> Self {
        let message = body
            .summary()
            .unwrap_or_else(|| "request failed".to_string());
        Self::new(status, message)
    }
}
