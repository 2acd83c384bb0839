//! SAP-related domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::auth::{Credential, SessionCookies};

/// An authenticated SAP user and the session the backend issued for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapUser {
    pub user_id: String,
    /// Cookies to re-supply as a `CookieSession` credential on later calls
    pub cookies: SessionCookies,
}

/// Entry of the SAP user directory (`user-list`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SapUserInfo {
    #[serde(rename = "USERNAME", default)]
    pub user_id: String,
    #[serde(rename = "FULLNAME", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "EMAIL", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Any other attributes the backend returns
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Named command executed through the SAP `command` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SapCommand {
    pub name: String,
    /// JSON request body
    pub payload: Value,
    pub credential: Option<Credential>,
}

impl SapCommand {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self { name: name.into(), payload, credential: None }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }
}

/// Filter for a user directory search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub max_results: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_info_keeps_unknown_attributes() {
        let info: SapUserInfo = serde_json::from_value(json!({
            "USERNAME": "JDOE",
            "FULLNAME": "Jane Doe",
            "DEPARTMENT": "FI"
        }))
        .unwrap();

        assert_eq!(info.user_id, "JDOE");
        assert_eq!(info.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(info.email, None);
        assert_eq!(info.attributes.get("DEPARTMENT"), Some(&json!("FI")));
    }

    #[test]
    fn command_builder_attaches_credential() {
        let command = SapCommand::new("CREATE_ORDER", json!({"qty": 1}))
            .with_credential(Credential::basic("abc"));

        assert_eq!(command.name, "CREATE_ORDER");
        assert_eq!(command.credential, Some(Credential::basic("abc")));
    }
}
