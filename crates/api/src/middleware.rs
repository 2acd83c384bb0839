//! Inbound auth middleware
//!
//! Turns the `Authorization` header into a [`Credential`] and attaches it to
//! the request extensions as [`RequestCredential`]:
//!
//! | Header                  | Outcome                                      |
//! |-------------------------|----------------------------------------------|
//! | missing / not UTF-8     | 401, not forwarded                           |
//! | `Bearer <valid token>`  | `CookieSession` from the `accesses` claim     |
//! | `Bearer <invalid>`      | 401, not forwarded                           |
//! | `Basic <value>`         | `Basic` with the value passed through as-is  |
//! | any other scheme        | forwarded with no credential                 |

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sapbridge_core::{extract_session_cookies, TokenValidator};
use sapbridge_domain::Credential;
use tracing::debug;

pub const MISSING_AUTHORIZATION: &str = "error: no one token authorization exists";
pub const NOT_AUTHORIZED: &str = "error: you should be authorized for this action";

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenValidator>,
}

/// Credential derived from the inbound `Authorization` header.
///
/// `None` when the scheme was not recognised; handlers must treat that as
/// unauthenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestCredential(pub Option<Credential>);

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let credential = authenticate_headers(state.tokens.as_ref(), req.headers())?;

    debug!(
        credential = credential.as_ref().map_or("none", Credential::kind),
        "request credential attached"
    );
    req.extensions_mut().insert(RequestCredential(credential));

    Ok(next.run(req).await)
}

/// Derive the request credential from the `Authorization` header.
///
/// # Errors
/// A ready-made 401 response when the header is missing, a Bearer token does
/// not verify, or a recognised scheme carries no value.
pub fn authenticate_headers(
    tokens: &dyn TokenValidator,
    headers: &HeaderMap,
) -> Result<Option<Credential>, Response> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthorized(MISSING_AUTHORIZATION))?;

    let (scheme, value) = header.split_once(' ').unwrap_or((header, ""));
    let value = value.trim();

    match scheme {
        "Bearer" => {
            if value.is_empty() {
                return Err(unauthorized(NOT_AUTHORIZED));
            }
            let claims = tokens.validate(value).map_err(|_| {
                debug!("bearer token rejected");
                unauthorized(NOT_AUTHORIZED)
            })?;
            Ok(Some(Credential::cookie_session(extract_session_cookies(&claims))))
        }
        "Basic" => {
            if value.is_empty() {
                return Err(unauthorized(NOT_AUTHORIZED));
            }
            Ok(Some(Credential::basic(value)))
        }
        other => {
            debug!(scheme = other, "unrecognised authorization scheme; no credential attached");
            Ok(None)
        }
    }
}

fn unauthorized(reason: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, reason).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use sapbridge_core::TokenError;
    use sapbridge_domain::{Claims, SessionCookies};
    use serde_json::json;

    use super::*;

    /// Accepts exactly one token string.
    struct FixedToken;

    impl TokenValidator for FixedToken {
        fn validate(&self, token: &str) -> Result<Claims, TokenError> {
            if token != "good" {
                return Err(TokenError::Invalid);
            }
            Ok(serde_json::from_value(json!({
                "accesses": {
                    "sap-usercontext": "sap-client=100",
                    "MYSAPSSO2": "sso",
                    "SAP_SESSIONID_BID_100": "sid"
                }
            }))
            .unwrap())
        }
    }

    fn headers(authorization: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(authorization));
        headers
    }

    fn status(headers: &HeaderMap) -> StatusCode {
        authenticate_headers(&FixedToken, headers)
            .map(|_| StatusCode::OK)
            .unwrap_or_else(|response| response.status())
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_eq!(status(&HeaderMap::new()), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn valid_bearer_becomes_cookie_session() {
        let credential = authenticate_headers(&FixedToken, &headers("Bearer good")).unwrap();

        let expected: SessionCookies = [
            ("sap-usercontext", "sap-client=100"),
            ("MYSAPSSO2", "sso"),
            ("SAP_SESSIONID_BID_100", "sid"),
        ]
        .into_iter()
        .collect();
        assert_eq!(credential, Some(Credential::cookie_session(expected)));
    }

    #[test]
    fn invalid_or_empty_bearer_is_unauthorized() {
        assert_eq!(status(&headers("Bearer bad")), StatusCode::UNAUTHORIZED);
        assert_eq!(status(&headers("Bearer")), StatusCode::UNAUTHORIZED);
        assert_eq!(status(&headers("Bearer   ")), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn basic_value_is_passed_through_verbatim() {
        let credential =
            authenticate_headers(&FixedToken, &headers("Basic dXhsYW5kMTpzZWNyZXQ=")).unwrap();
        assert_eq!(credential, Some(Credential::basic("dXhsYW5kMTpzZWNyZXQ=")));
    }

    #[test]
    fn empty_basic_is_unauthorized() {
        assert_eq!(status(&headers("Basic ")), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_scheme_attaches_nothing() {
        assert_eq!(authenticate_headers(&FixedToken, &headers("Digest abc")).unwrap(), None);
        // Scheme names are matched exactly
        assert_eq!(authenticate_headers(&FixedToken, &headers("bearer good")).unwrap(), None);
    }
}
