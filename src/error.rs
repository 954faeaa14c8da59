use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure surfaced by a client operation.
///
/// Remote rejections keep the decoded LINE error body so callers can inspect
/// the server's message (reply-token reuse, rich-menu cap, plan limits and so
/// on). Transport and decode failures are distinct from well-formed remote
/// errors.
#[derive(Error, Debug)]
pub enum Error {
    /// 401/403: channel access token invalid, or a reply token that expired
    /// or was already used.
    #[error("unauthorized ({status}): {body}")]
    Unauthorized { status: StatusCode, body: ErrorBody },
    /// 404: user, group, room, rich menu or message content not reachable.
    #[error("not found: {body}")]
    NotFound { body: ErrorBody },
    /// 429: plan or resource-count limit hit (e.g. the rich menu cap).
    #[error("quota exceeded: {body}")]
    QuotaExceeded { body: ErrorBody },
    /// 400: request rejected by the remote service.
    #[error("invalid argument: {body}")]
    InvalidArgument { body: ErrorBody },
    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    Api { status: StatusCode, body: ErrorBody },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("token supplier: {0}")]
    TokenSupplier(String),
    #[error("missing env var {var}")]
    MissingEnvVar { var: String },
}

impl Error {
    /// Classify a non-success response by status code. The remote does not
    /// publish a status-to-category contract, so the raw status and body are
    /// carried on every variant.
    pub(crate) fn from_status(status: StatusCode, body: ErrorBody) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Error::Unauthorized { status, body }
            }
            StatusCode::NOT_FOUND => Error::NotFound { body },
            StatusCode::TOO_MANY_REQUESTS => Error::QuotaExceeded { body },
            StatusCode::BAD_REQUEST => Error::InvalidArgument { body },
            _ => Error::Api { status, body },
        }
    }

    /// The decoded remote error body, when this failure came from a
    /// well-formed remote rejection.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Error::Unauthorized { body, .. }
            | Error::NotFound { body }
            | Error::QuotaExceeded { body }
            | Error::InvalidArgument { body }
            | Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Error payload returned by the LINE API: a summary `message` and optional
/// per-property `details`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: Option<String>,
    pub property: Option<String>,
}

impl ErrorBody {
    /// Decode the LINE error JSON, falling back to the raw text for bodies
    /// that are not in that shape (proxies, HTML error pages).
    pub(crate) fn from_text(text: String) -> Self {
        serde_json::from_str(&text).unwrap_or(ErrorBody {
            message: text,
            details: Vec::new(),
        })
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        for detail in &self.details {
            if let Some(msg) = &detail.message {
                match &detail.property {
                    Some(prop) => write!(f, "; {prop}: {msg}")?,
                    None => write!(f, "; {msg}")?,
                }
            }
        }
        Ok(())
    }
}
