//! Inbound token validation

pub mod jwt;

pub use jwt::HmacTokenValidator;
