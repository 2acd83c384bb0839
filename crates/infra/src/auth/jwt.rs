//! HMAC-signed Bearer token validation

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sapbridge_core::{TokenError, TokenValidator};
use sapbridge_domain::{AuthConfig, Claims};
use tracing::debug;

/// Validates Bearer tokens signed with a shared secret (HS256/384/512).
///
/// Tokens are accepted on signature alone unless expiry enforcement is
/// switched on.
#[derive(Clone)]
pub struct HmacTokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl HmacTokenValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self { key: DecodingKey::from_secret(secret.as_ref()), validation }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.api_secret.as_bytes()).with_expiry_enforcement(config.enforce_expiry)
    }

    /// Require an `exp` claim and reject tokens past it.
    pub fn with_expiry_enforcement(mut self, enforce: bool) -> Self {
        self.validation.validate_exp = enforce;
        if enforce {
            self.validation.required_spec_claims.insert("exp".to_string());
        } else {
            self.validation.required_spec_claims.remove("exp");
        }
        self
    }
}

impl TokenValidator for HmacTokenValidator {
    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.key, &self.validation).map(|data| data.claims).map_err(|err| {
            debug!(reason = ?err.kind(), "rejected bearer token");
            TokenError::Invalid
        })
    }
}
