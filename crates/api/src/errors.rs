//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sapbridge_core::{SapCallError, TransportKind};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::middleware::NOT_AUTHORIZED;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable credential on the request
    #[error("unauthenticated")]
    Unauthenticated,

    #[error(transparent)]
    Sap(#[from] SapCallError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Sap(err) => sap_status(err),
        }
    }

    /// Stable label used as the `error` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Sap(err) => err.category(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Unauthenticated => json_error(status, self.code(), NOT_AUTHORIZED),
            Self::Sap(err) => {
                warn!(status = status.as_u16(), category = err.category(), "SAP call failed");
                json_error(status, self.code(), err.to_string())
            }
        }
    }
}

/// Backend 4xx/5xx codes are relayed as-is; everything else the gateway
/// could not turn into a result is a bad gateway.
fn sap_status(err: &SapCallError) -> StatusCode {
    match err {
        SapCallError::Http { code, .. } => u16::try_from(*code)
            .ok()
            .filter(|code| (400..600).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        SapCallError::Application { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SapCallError::Transport { kind: TransportKind::Timeout, .. } => StatusCode::GATEWAY_TIMEOUT,
        SapCallError::MalformedEnvelope(_)
        | SapCallError::Payload(_)
        | SapCallError::Transport { .. } => StatusCode::BAD_GATEWAY,
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
