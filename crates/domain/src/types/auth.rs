//! Caller identity and SAP session types

use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ACCESSES_CLAIM, SESSION_COOKIE_NAMES};

/// Proof of identity presented by a caller.
///
/// Exactly one form is carried. A `Basic` value is the already-encoded
/// `base64(user:pass)` string and is forwarded verbatim as the
/// `Authorization` payload; it is never decoded or re-derived here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    /// HTTP Basic credentials, `base64(user:pass)`
    Basic { value: String },
    /// An established SAP session
    CookieSession { cookies: SessionCookies },
}

impl Credential {
    /// Wrap an already-encoded Basic value.
    pub fn basic(value: impl Into<String>) -> Self {
        Self::Basic { value: value.into() }
    }

    /// Encode `user:password` and wrap it as a Basic credential.
    pub fn basic_from_parts(user: &str, password: &str) -> Self {
        Self::Basic { value: STANDARD.encode(format!("{user}:{password}")) }
    }

    pub fn cookie_session(cookies: SessionCookies) -> Self {
        Self::CookieSession { cookies }
    }

    /// Stable label for logging; never includes the secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::CookieSession { .. } => "cookie_session",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { .. } => f.debug_struct("Basic").field("value", &"<redacted>").finish(),
            Self::CookieSession { cookies } => f
                .debug_struct("CookieSession")
                .field("cookie_names", &cookies.names().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Cookie name → value mapping that identifies one SAP session.
///
/// Names are unique; inserting an existing name overwrites it. Iteration is
/// ordered by name so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCookies(BTreeMap<String, String>);

impl SessionCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a cookie, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when all three session cookies are present.
    ///
    /// A set that is not complete means the session was not fully
    /// established; callers should re-authenticate instead of using it.
    pub fn is_complete(&self) -> bool {
        SESSION_COOKIE_NAMES.iter().all(|name| self.0.contains_key(*name))
    }

    /// Keep only the three session cookie names.
    pub fn session_only(&self) -> Self {
        self.0
            .iter()
            .filter(|(name, _)| SESSION_COOKIE_NAMES.contains(&name.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Render as a `Cookie` request header value: `a=1; b=2`.
    pub fn to_cookie_header(&self) -> String {
        self.iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("; ")
    }
}

impl FromIterator<(String, String)> for SessionCookies {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SessionCookies {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }
}

/// Claim set of a verified signed token.
///
/// Claims are kept as loosely typed JSON; nothing about the nested shape is
/// assumed beyond what a lookup explicitly asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The `accesses` claim, if present and shaped as an object.
    pub fn accesses(&self) -> Option<&Map<String, Value>> {
        self.0.get(ACCESSES_CLAIM).and_then(Value::as_object)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
