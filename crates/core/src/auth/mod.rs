//! Credential verification and SAP session derivation

pub mod ports;
pub mod session;

pub use ports::*;
pub use session::extract_session_cookies;
