use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sapbridge_domain::Credential;

use crate::errors::ApiError;
use crate::middleware::RequestCredential;

/// Extractor for the credential attached by the auth middleware.
///
/// Rejects with 401 when the middleware did not run or the request used an
/// unrecognised authorization scheme.
#[derive(Debug, Clone)]
pub struct SapCredential(pub Credential);

impl<S> FromRequestParts<S> for SapCredential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestCredential>() {
            Some(RequestCredential(Some(credential))) => Ok(Self(credential.clone())),
            _ => Err(ApiError::Unauthenticated),
        }
    }
}
