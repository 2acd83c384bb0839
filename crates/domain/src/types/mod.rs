//! Domain types

pub mod auth;
pub mod envelope;
pub mod sap;

pub use auth::{Claims, Credential, SessionCookies};
pub use envelope::{Envelope, SapMessage};
pub use sap::{SapCommand, SapUser, SapUserInfo, UserQuery};
