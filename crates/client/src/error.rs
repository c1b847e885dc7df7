use crate::transport::TransportError;

/// Message used when the request was sent but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str = "no response from server, check network";

/// Message used when the request could not be built or dispatched.
pub const FALLBACK_MESSAGE: &str = "an error occurred while making the API request";

/// Which failure produced an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-2xx status.
    Server { status: u16 },
    /// No response arrived (connection refused, reset, timed out).
    NoResponse,
    /// The request could not be constructed or the reply could not be read.
    Other,
}

/// The single error surfaced by every client operation.
///
/// `Display` prints only the resolved message, so callers can show it
/// to users directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    /// Build from a non-2xx response. Uses the body's `detail` string when
    /// present.
    pub fn from_server_response(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("detail")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("server error: {status}"));

        Self {
            kind: ApiErrorKind::Server { status },
            message,
        }
    }

    pub fn no_response() -> Self {
        Self {
            kind: ApiErrorKind::NoResponse,
            message: NO_RESPONSE_MESSAGE.to_string(),
        }
    }

    pub fn other() -> Self {
        Self {
            kind: ApiErrorKind::Other,
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    /// HTTP status for server-responded errors.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Server { status } => Some(status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(_) => Self::no_response(),
            TransportError::Setup(_) => Self::other(),
        }
    }
}
