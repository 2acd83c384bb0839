//! Backend-defined names
//!
//! Cookie names, claim keys and query parameter names fixed by the SAP
//! service. These are case-sensitive.

/// Cookie carrying the SAP user context (client, language).
pub const USER_CONTEXT_COOKIE: &str = "sap-usercontext";

/// SAP logon ticket cookie.
pub const SSO_COOKIE: &str = "MYSAPSSO2";

/// Session id cookie for the configured SAP client.
pub const SESSION_ID_COOKIE: &str = "SAP_SESSIONID_BID_100";

/// The three cookies that make up an authenticated SAP session.
pub const SESSION_COOKIE_NAMES: [&str; 3] = [USER_CONTEXT_COOKIE, SSO_COOKIE, SESSION_ID_COOKIE];

/// Claim holding the session cookie values inside a signed token.
pub const ACCESSES_CLAIM: &str = "accesses";

/// Envelope member carrying the typed payload.
pub const DATA_MEMBER: &str = "DATA";

/// Value of the envelope `SUCCESS` flag when the backend reports success.
pub const SUCCESS_FLAG: &str = "X";

/// Message type marking an error-severity envelope message.
pub const ERROR_MESSAGE_TYPE: &str = "E";

// Query parameter names
pub const PARAM_APP_ID: &str = "APPID";
pub const PARAM_COMMAND: &str = "COMMAND";
pub const PARAM_SAP_CLIENT: &str = "sap-client";
pub const PARAM_SEARCH: &str = "SEARCH";
pub const PARAM_MAX_RESULTS: &str = "MAXRESULTS";

// Endpoint paths, relative to the configured base URL
pub const USER_INFO_PATH: &str = "user-info";
pub const COMMAND_PATH: &str = "command";
pub const USER_LIST_PATH: &str = "user-list";
