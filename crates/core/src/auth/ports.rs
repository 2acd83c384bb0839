//! Port interfaces for inbound token verification

use sapbridge_domain::{Claims, SapBridgeError};
use thiserror::Error;

/// Verification failure for a signed token.
///
/// Deliberately opaque: parse errors, bad signatures and (when enforced)
/// expiry all collapse into one variant so the reason never leaves the
/// validator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
}

impl From<TokenError> for SapBridgeError {
    fn from(err: TokenError) -> Self {
        SapBridgeError::Auth(err.to_string())
    }
}

/// Verifies an externally issued signed token and yields its claims.
///
/// Implementations must never return claims from a token whose signature
/// could not be verified.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;
}
