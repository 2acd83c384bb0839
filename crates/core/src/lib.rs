//! # SapBridge Core
//!
//! Pure logic layer - no HTTP, no token library, no I/O.
//!
//! This crate contains:
//! - The response envelope decoder and its error classification
//! - Session cookie extraction from verified token claims
//! - Port interfaces (traits) for token validation and the SAP client
//!
//! ## Architecture Principles
//! - Only depends on `sapbridge-domain`
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod envelope;

// Infrastructure ports
pub mod sap_ports;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{TokenError, TokenValidator};
pub use auth::session::extract_session_cookies;
pub use envelope::decoder::{check_http_status, decode, DecodedEnvelope};
pub use envelope::errors::{SapCallError, TransportKind};
pub use sap_ports::{CommandOutcome, SapClient};
