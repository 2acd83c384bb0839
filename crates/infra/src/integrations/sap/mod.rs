//! SAP integration
//!
//! # Architecture
//!
//! - **Client**: `SapClient` implements the core `SapClient` port over the
//!   SAP REST service (`user-info`, `command`, `user-list`)
//! - **Jar**: `SessionJar` carries the SAP session cookies for one call
//!
//! # Usage
//!
//! ```no_run
//! use sapbridge_core::SapClient as _;
//! use sapbridge_domain::{Credential, SapConfig};
//! use sapbridge_infra::integrations::sap::SapClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SapConfig {
//!     base_url: "http://sap.local/qua/api/".into(),
//!     app_id: "TIMESHEET".into(),
//!     sap_client: "100".into(),
//!     timeout_seconds: 600,
//! };
//! let client = SapClient::new(&config)?;
//!
//! // Log in once with Basic credentials...
//! let user = client.authenticate(&Credential::basic_from_parts("JDOE", "secret")).await?;
//!
//! // ...and reuse the returned session afterwards.
//! let session = Credential::cookie_session(user.cookies);
//! client.authenticate(&session).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - Transport failures: `SapCallError::Transport`, never retried
//! - Envelope failures: classified by `sapbridge_core::decode`

pub mod client;
pub mod jar;

pub use client::SapClient;
pub use jar::SessionJar;
