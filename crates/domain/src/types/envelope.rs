//! SAP response envelope
//!
//! Every SAP REST response wraps its payload as
//! `{"result": int, "SUCCESS": "X"|.., "Messages": [..], "DATA": ..}`.
//! The `DATA` member is left to the decoder so it can be deserialized into
//! the caller's own shape.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{ERROR_MESSAGE_TYPE, SUCCESS_FLAG};

/// Outer status fields of a SAP response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Application result code; values above zero follow HTTP status semantics
    #[serde(
        rename = "result",
        alias = "RESULT",
        alias = "Result",
        default,
        deserialize_with = "null_as_default",
    )]
    pub result_code: i64,

    /// `"X"` when the backend flags success
    #[serde(
        rename = "SUCCESS",
        alias = "success",
        alias = "Success",
        default,
        deserialize_with = "null_as_default",
    )]
    pub success: String,

    #[serde(
        rename = "Messages",
        alias = "messages",
        alias = "MESSAGES",
        default,
        deserialize_with = "null_as_default",
    )]
    pub messages: Vec<SapMessage>,
}

impl Envelope {
    /// Whether the `SUCCESS` flag carries the literal success marker.
    pub fn is_flagged_success(&self) -> bool {
        self.success == SUCCESS_FLAG
    }

    /// Error-severity messages, in the order the backend sent them.
    pub fn error_messages(&self) -> impl Iterator<Item = &SapMessage> {
        self.messages.iter().filter(|m| m.is_error())
    }
}

/// A single severity-tagged backend message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapMessage {
    #[serde(
        rename = "msgType",
        alias = "MSGTYPE",
        alias = "msgtype",
        default,
        deserialize_with = "null_as_default",
    )]
    pub msg_type: String,

    #[serde(
        rename = "msgTitle",
        alias = "MSGTITLE",
        alias = "msgtitle",
        default,
        deserialize_with = "null_as_default",
    )]
    pub msg_title: String,
}

impl SapMessage {
    pub fn new(msg_type: impl Into<String>, msg_title: impl Into<String>) -> Self {
        Self { msg_type: msg_type.into(), msg_title: msg_title.into() }
    }

    pub fn is_error(&self) -> bool {
        self.msg_type == ERROR_MESSAGE_TYPE
    }
}

/// Treat an explicit JSON `null` like an absent member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"result":0,"SUCCESS":"X","Messages":[{"msgType":"W","msgTitle":"Heads up"}]}"#,
        )
        .unwrap();

        assert_eq!(envelope.result_code, 0);
        assert!(envelope.is_flagged_success());
        assert_eq!(envelope.messages, vec![SapMessage::new("W", "Heads up")]);
        assert_eq!(envelope.error_messages().count(), 0);
    }

    #[test]
    fn missing_and_null_members_default() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"SUCCESS":null,"Messages":null}"#).unwrap();

        assert_eq!(envelope, Envelope::default());
        assert!(!envelope.is_flagged_success());
    }

    #[test]
    fn accepts_upper_case_member_names() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"RESULT":404,"MESSAGES":[{"MSGTYPE":"E","MSGTITLE":"gone"}]}"#,
        )
        .unwrap();

        assert_eq!(envelope.result_code, 404);
        assert_eq!(envelope.error_messages().next().map(|m| m.msg_title.as_str()), Some("gone"));
    }

    #[test]
    fn wrong_result_type_is_rejected() {
        let parsed = serde_json::from_str::<Envelope>(r#"{"result":"0"}"#);
        assert!(parsed.is_err());
    }
}
