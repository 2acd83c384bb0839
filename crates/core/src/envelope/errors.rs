//! Classified failures of a single SAP call
//!
//! The backend reports failure on three independent layers (HTTP status,
//! envelope result code, per-message severity). Each layer maps onto one
//! variant here; transport failures that never produced a response get their
//! own variant. None of these are retried internally.

use std::fmt;

use sapbridge_domain::SapBridgeError;
use thiserror::Error;

/// Why a request never produced a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The configured per-call timeout elapsed
    Timeout,
    /// The backend could not be reached
    Connect,
    /// The request could not be built or sent
    Request,
    /// The response body could not be read
    Body,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connect"),
            Self::Request => write!(f, "request"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Outcome classification of a failed SAP call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SapCallError {
    /// HTTP status, or envelope result code, outside `[200, 300)`
    #[error("Http error: {code}, {message}")]
    Http { code: i64, message: String },

    /// Body is not a SAP envelope
    #[error("malformed SAP envelope: {0}")]
    MalformedEnvelope(String),

    /// One or more error-severity messages; titles joined by newlines
    #[error("{message}")]
    Application { message: String },

    /// Envelope accepted but `DATA` does not fit the requested shape
    #[error("unexpected SAP payload: {0}")]
    Payload(String),

    #[error("SAP transport error ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },
}

impl SapCallError {
    pub fn http(code: i64, message: impl Into<String>) -> Self {
        Self::Http { code, message: message.into() }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application { message: message.into() }
    }

    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport { kind, message: message.into() }
    }

    /// The backend rejected the caller's credential or session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Http { code: 401 | 403, .. })
    }

    /// Stable label for log fields and error bodies.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::MalformedEnvelope(_) => "malformed_envelope",
            Self::Application { .. } => "application",
            Self::Payload(_) => "payload",
            Self::Transport { kind: TransportKind::Timeout, .. } => "timeout",
            Self::Transport { .. } => "transport",
        }
    }
}

impl From<SapCallError> for SapBridgeError {
    fn from(err: SapCallError) -> Self {
        let message = err.to_string();
        match err {
            SapCallError::Http { code: 401 | 403, .. } => SapBridgeError::Auth(message),
            SapCallError::Http { code: 404, .. } => SapBridgeError::NotFound(message),
            SapCallError::Http { .. } | SapCallError::Transport { .. } => {
                SapBridgeError::Network(message)
            }
            SapCallError::Application { .. } => SapBridgeError::InvalidInput(message),
            SapCallError::MalformedEnvelope(_) | SapCallError::Payload(_) => {
                SapBridgeError::Internal(message)
            }
        }
    }
}
