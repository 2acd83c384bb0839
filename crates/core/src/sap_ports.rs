//! SAP integration port interfaces

use async_trait::async_trait;
use sapbridge_domain::{Credential, Envelope, SapCommand, SapUser, SapUserInfo, UserQuery};
use serde_json::Value;

use crate::envelope::SapCallError;

/// Result of a command that passed every envelope check.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome<T> {
    /// Outer envelope, for callers that want the non-error messages
    pub envelope: Envelope,
    pub data: T,
}

/// Trait for SAP client operations
///
/// Every call is a single request/response exchange with its own cookie
/// jar. Implementations perform no retries.
#[async_trait]
pub trait SapClient: Send + Sync {
    /// Validate a credential against SAP and return the session it opens.
    ///
    /// On failure no session is produced; the caller's existing cookies stay
    /// as they were.
    async fn authenticate(&self, credential: &Credential) -> Result<SapUser, SapCallError>;

    /// Execute a named command, returning the raw `DATA` payload.
    async fn send_command(
        &self,
        command: &SapCommand,
    ) -> Result<CommandOutcome<Value>, SapCallError>;

    /// Search the SAP user directory.
    async fn list_users(
        &self,
        query: &UserQuery,
        credential: &Credential,
    ) -> Result<Vec<SapUserInfo>, SapCallError>;
}
