use shared::error::ApiException;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeCategory {
    Auth,
    Transport,
    Validation,
    Server,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("request failed with HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to decode {resource} page: {message}")]
    Decode { resource: String, message: String },
    #[error("malformed pagination envelope: {0}")]
    MalformedEnvelope(String),
    #[error("{0}")]
    Validation(String),
    #[error("unknown action '{action}' for {resource}")]
    UnknownAction { resource: String, action: String },
    #[error("failed to build CSV export: {0}")]
    Export(String),
}

impl ListError {
    /// Converts a failure from the transport seam, keeping the HTTP status when
    /// the server answered.
    pub fn from_transport(err: anyhow::Error) -> Self {
        if let Some(api) = err.downcast_ref::<ApiException>() {
            return Self::Http {
                status: api.status,
                message: api.message.clone(),
            };
        }
        Self::Transport(format!("{err:#}"))
    }

    pub fn category(&self) -> NoticeCategory {
        match self {
            Self::Http { status, .. } => match status {
                401 | 403 => NoticeCategory::Auth,
                400 | 409 | 422 => NoticeCategory::Validation,
                500..=599 => NoticeCategory::Server,
                _ => NoticeCategory::Unknown,
            },
            Self::Transport(message) => classify_message(message),
            Self::Decode { .. } | Self::MalformedEnvelope(_) => NoticeCategory::Server,
            Self::Validation(_) | Self::UnknownAction { .. } => NoticeCategory::Validation,
            Self::Export(_) => NoticeCategory::Unknown,
        }
    }

    /// Auth failures mean the session is gone and the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        self.category() == NoticeCategory::Auth
    }
}

/// Best-effort category for failures that only carry a message.
pub fn classify_message(message: &str) -> NoticeCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("http 401")
        || lower.contains("http 403")
        || lower.contains("unauthorized")
        || lower.contains("forbidden")
        || lower.contains("token")
    {
        NoticeCategory::Auth
    } else if lower.contains("http 5") || lower.contains("server error") {
        NoticeCategory::Server
    } else if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
        || lower.contains("unavailable")
    {
        NoticeCategory::Transport
    } else if lower.contains("invalid") || lower.contains("required") || lower.contains("missing")
    {
        NoticeCategory::Validation
    } else {
        NoticeCategory::Unknown
    }
}
