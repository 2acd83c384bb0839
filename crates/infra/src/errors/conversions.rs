//! Conversions from external infrastructure errors into SAP call errors.

use reqwest::Error as HttpError;
use sapbridge_core::{SapCallError, TransportKind};
use sapbridge_domain::SapBridgeError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the core error types.
#[derive(Debug)]
pub struct InfraError(pub SapCallError);

impl From<InfraError> for SapCallError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<InfraError> for SapBridgeError {
    fn from(value: InfraError) -> Self {
        value.0.into()
    }
}

impl From<SapCallError> for InfraError {
    fn from(value: SapCallError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSapCallError {
    fn into_sap_call_error(self) -> SapCallError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SapCallError */
/* -------------------------------------------------------------------------- */

impl IntoSapCallError for HttpError {
    fn into_sap_call_error(self) -> SapCallError {
        if self.is_timeout() {
            return SapCallError::transport(TransportKind::Timeout, "HTTP request timed out");
        }

        if self.is_connect() {
            return SapCallError::transport(
                TransportKind::Connect,
                format!("HTTP connection failed: {self}"),
            );
        }

        if self.is_body() || self.is_decode() {
            return SapCallError::transport(
                TransportKind::Body,
                format!("failed to read HTTP response body: {self}"),
            );
        }

        if let Some(status) = self.status() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return SapCallError::http(i64::from(status.as_u16()), reason);
        }

        SapCallError::transport(TransportKind::Request, format!("HTTP request failed: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_sap_call_error())
    }
}
