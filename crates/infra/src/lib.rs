//! # SapBridge Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-backed SAP client and its per-call session cookie jar
//! - HMAC Bearer token validation
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `sapbridge-core`
//! - Contains all "impure" code (network and file I/O)

pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use auth::HmacTokenValidator;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::sap::{SapClient, SessionJar};
