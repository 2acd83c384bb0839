//! Configuration management

use serde::{Deserialize, Serialize};

/// Default outbound call timeout (10 minutes; some SAP commands are slow).
pub const DEFAULT_SAP_TIMEOUT_SECS: u64 = 600;

/// Default bind address for the gateway.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default time zone for SAP date formatting.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub sap: SapConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dates: DateConfig,
}

/// SAP backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapConfig {
    /// Base URL of the SAP REST service, e.g. `http://sap.local/qua/api/`
    pub base_url: String,
    /// Application id sent as `APPID` with every command
    #[serde(default)]
    pub app_id: String,
    /// SAP client number sent as `sap-client`
    #[serde(default)]
    pub sap_client: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Inbound token configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for Bearer tokens
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// Reject tokens whose `exp` claim has passed. Off unless asked for.
    #[serde(default)]
    pub enforce_expiry: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_secret", &"<redacted>")
            .field("enforce_expiry", &self.enforce_expiry)
            .finish()
    }
}

/// Gateway server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub json_logs: bool,
}

/// Date formatting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConfig {
    /// IANA time zone name used when reading and writing SAP dates
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), json_logs: false }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self { timezone: default_timezone() }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_SAP_TIMEOUT_SECS
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
