//! # SapBridge API
//!
//! HTTP gateway in front of the SAP REST service.
//!
//! This crate contains:
//! - The inbound auth middleware (Bearer/Basic → `Credential`)
//! - Route handlers for sessions, commands and user lookups
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Handlers talk to SAP only through the core `SapClient` port

pub mod context;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::{AppContext, SapCredential};
pub use errors::ApiError;
pub use middleware::{auth_middleware, AuthState, RequestCredential};
pub use routes::build_router;
