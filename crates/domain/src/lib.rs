//! # SapBridge Domain
//!
//! Value types shared by every SapBridge crate.
//!
//! This crate contains:
//! - Credential and session types (Credential, SessionCookies, Claims)
//! - The SAP response envelope and user/command models
//! - Domain error types and Result definitions
//! - Configuration structures
//! - SAP date/time formatting
//!
//! ## Architecture
//! - No dependencies on other SapBridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::dates::SapDateFormatter;
