//! Application context - dependency injection container

mod credential;

use std::sync::Arc;

use sapbridge_core::{SapClient as SapClientPort, TokenValidator};
use sapbridge_domain::{Config, Result, SapDateFormatter};
use sapbridge_infra::{HmacTokenValidator, SapClient};

pub use credential::SapCredential;

use crate::middleware::AuthState;

/// Type alias for the SAP client port trait object
type DynSapClient = dyn SapClientPort;

/// Type alias for the token validator port trait object
type DynTokenValidator = dyn TokenValidator;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub sap: Arc<DynSapClient>,
    pub tokens: Arc<DynTokenValidator>,
    pub dates: SapDateFormatter,
}

impl AppContext {
    /// Wire the production adapters from configuration.
    ///
    /// # Errors
    /// Returns `SapBridgeError::Config` for an unusable SAP base URL or an
    /// unknown time zone.
    pub fn new(config: Config) -> Result<Self> {
        let sap = Arc::new(SapClient::new(&config.sap)?);
        let tokens = Arc::new(HmacTokenValidator::from_config(&config.auth));
        Self::with_ports(config, sap, tokens)
    }

    /// Build a context around explicit port implementations (for tests).
    pub fn with_ports(
        config: Config,
        sap: Arc<DynSapClient>,
        tokens: Arc<DynTokenValidator>,
    ) -> Result<Self> {
        let dates = SapDateFormatter::from_config(&config.dates)?;
        Ok(Self { config, sap, tokens, dates })
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState { tokens: Arc::clone(&self.tokens) }
    }
}
