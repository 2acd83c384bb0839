//! Per-call SAP session cookie jar
//!
//! A [`SessionJar`] is created for exactly one outbound call. It is seeded
//! from the caller's credential, sends every cookie it holds on each request
//! (redirects included) and absorbs `Set-Cookie` headers from each response.
//! After the call, [`SessionJar::session_cookies`] projects it back onto the
//! three SAP session cookies.
//!
//! Domain, path and expiry attributes are ignored; a jar only ever talks to
//! one backend for the lifetime of one call.

use parking_lot::RwLock;
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use sapbridge_domain::{Credential, SessionCookies};
use tracing::{debug, warn};
use url::Url;

/// Mutable cookie store for a single SAP exchange.
#[derive(Debug, Default)]
pub struct SessionJar {
    cookies: RwLock<SessionCookies>,
}

impl SessionJar {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed a jar from the credential attached to a call.
    ///
    /// Basic credentials travel in the `Authorization` header, so they leave
    /// the jar empty.
    pub fn for_credential(credential: Option<&Credential>) -> Self {
        match credential {
            Some(Credential::CookieSession { cookies }) => Self::from(cookies.clone()),
            Some(Credential::Basic { .. }) | None => Self::empty(),
        }
    }

    /// The three SAP session cookies currently held, if present.
    pub fn session_cookies(&self) -> SessionCookies {
        self.cookies.read().session_only()
    }

    /// Every cookie currently held.
    pub fn snapshot(&self) -> SessionCookies {
        self.cookies.read().clone()
    }

    fn absorb(&self, set_cookie: &str) {
        let Some((name, value)) = parse_set_cookie(set_cookie) else {
            debug!("ignoring unparseable Set-Cookie header");
            return;
        };
        debug!(cookie = name, "storing cookie from SAP response");
        self.cookies.write().insert(name, value);
    }
}

impl From<SessionCookies> for SessionJar {
    fn from(cookies: SessionCookies) -> Self {
        Self { cookies: RwLock::new(cookies) }
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, _url: &Url) {
        for header in cookie_headers {
            match header.to_str() {
                Ok(raw) => self.absorb(raw),
                Err(_) => debug!("ignoring non-ASCII Set-Cookie header"),
            }
        }
    }

    fn cookies(&self, _url: &Url) -> Option<HeaderValue> {
        let cookies = self.cookies.read();
        if cookies.is_empty() {
            return None;
        }

        match HeaderValue::from_str(&cookies.to_cookie_header()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "session cookies cannot be sent as a header");
                None
            }
        }
    }
}

/// `name=value` from the first segment of a `Set-Cookie` header.
fn parse_set_cookie(raw: &str) -> Option<(&str, &str)> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

#[cfg(test)]
mod tests {
    use sapbridge_domain::constants::{SESSION_ID_COOKIE, SSO_COOKIE, USER_CONTEXT_COOKIE};

    use super::*;

    fn url() -> Url {
        Url::parse("http://sap.local/qua/api/user-info").unwrap()
    }

    fn set(jar: &SessionJar, headers: &[&'static str]) {
        let values: Vec<HeaderValue> =
            headers.iter().copied().map(HeaderValue::from_static).collect();
        jar.set_cookies(&mut values.iter(), &url());
    }

    fn full_session() -> SessionCookies {
        [
            (USER_CONTEXT_COOKIE, "sap-client=100"),
            (SSO_COOKIE, "AjQxMDMBABhKAEQATwBF"),
            (SESSION_ID_COOKIE, "x9Zk%3d"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_jar_sends_no_cookie_header() {
        assert!(SessionJar::empty().cookies(&url()).is_none());
        assert!(SessionJar::for_credential(None).cookies(&url()).is_none());
        assert!(SessionJar::for_credential(Some(&Credential::basic("dXNlcjpwdw==")))
            .cookies(&url())
            .is_none());
    }

    #[test]
    fn seeded_jar_sends_all_cookies() {
        let jar = SessionJar::for_credential(Some(&Credential::cookie_session(full_session())));

        let header = jar.cookies(&url()).unwrap();
        assert_eq!(
            header.to_str().unwrap(),
            "MYSAPSSO2=AjQxMDMBABhKAEQATwBF; SAP_SESSIONID_BID_100=x9Zk%3d; sap-usercontext=sap-client=100"
        );
    }

    #[test]
    fn set_cookie_attributes_are_dropped() {
        let jar = SessionJar::empty();
        set(&jar, &["MYSAPSSO2=ticket; path=/; domain=.sap.local; HttpOnly"]);

        assert_eq!(jar.snapshot().get(SSO_COOKIE), Some("ticket"));
    }

    #[test]
    fn value_keeps_everything_after_the_first_equals() {
        let jar = SessionJar::empty();
        set(&jar, &["sap-usercontext=sap-client=100; path=/"]);

        assert_eq!(jar.snapshot().get(USER_CONTEXT_COOKIE), Some("sap-client=100"));
    }

    #[test]
    fn later_set_cookie_overrides_and_others_survive() {
        let jar = SessionJar::from(full_session());
        set(&jar, &["SAP_SESSIONID_BID_100=fresh; path=/"]);

        let cookies = jar.session_cookies();
        assert_eq!(cookies.get(SESSION_ID_COOKIE), Some("fresh"));
        assert_eq!(cookies.get(SSO_COOKIE), Some("AjQxMDMBABhKAEQATwBF"));
        assert!(cookies.is_complete());
    }

    #[test]
    fn projection_keeps_only_session_cookies() {
        let jar = SessionJar::empty();
        set(&jar, &["MYSAPSSO2=ticket", "JSESSIONID=abc", "=orphan", "garbage"]);

        assert_eq!(jar.snapshot().len(), 2);
        let session = jar.session_cookies();
        assert_eq!(session.len(), 1);
        assert_eq!(session.get(SSO_COOKIE), Some("ticket"));
    }

    #[test]
    fn projection_of_partial_session_omits_missing_names() {
        let jar = SessionJar::empty();
        set(&jar, &["sap-usercontext=sap-client=100"]);

        let session = jar.session_cookies();
        assert_eq!(session.names().collect::<Vec<_>>(), vec![USER_CONTEXT_COOKIE]);
        assert!(!session.is_complete());
    }
}
