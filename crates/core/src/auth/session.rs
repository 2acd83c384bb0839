//! Session cookie derivation from token claims
//!
//! A Bearer token issued after a SAP login carries the backend session in its
//! `accesses` claim:
//!
//! ```json
//! { "accesses": { "sap-usercontext": "..", "MYSAPSSO2": "..", "SAP_SESSIONID_BID_100": ".." } }
//! ```

use sapbridge_domain::constants::SESSION_COOKIE_NAMES;
use sapbridge_domain::{Claims, SessionCookies};
use serde_json::Value;
use tracing::debug;

/// Map the `accesses` claim onto the three SAP session cookies.
///
/// Never fails. A missing or non-object `accesses` claim yields an empty set;
/// missing or non-string sub-keys are skipped. Callers check
/// [`SessionCookies::is_complete`] before relying on the session.
pub fn extract_session_cookies(claims: &Claims) -> SessionCookies {
    let Some(accesses) = claims.accesses() else {
        debug!("token carries no accesses claim");
        return SessionCookies::new();
    };

    let mut cookies = SessionCookies::new();
    for name in SESSION_COOKIE_NAMES {
        match accesses.get(name) {
            Some(Value::String(value)) => {
                cookies.insert(name, value.as_str());
            }
            Some(_) => debug!(cookie = name, "accesses entry is not a string; skipped"),
            None => debug!(cookie = name, "accesses entry missing"),
        }
    }
    cookies
}
