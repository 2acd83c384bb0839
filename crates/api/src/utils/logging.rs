use sapbridge_domain::SapBridgeError;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Filtering follows `RUST_LOG` (default `info`). Safe to call more than
/// once; later calls are no-ops.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Convert a `SapBridgeError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &SapBridgeError) -> &'static str {
    match error {
        SapBridgeError::Config(_) => "config",
        SapBridgeError::Network(_) => "network",
        SapBridgeError::Auth(_) => "auth",
        SapBridgeError::NotFound(_) => "not_found",
        SapBridgeError::InvalidInput(_) => "invalid_input",
        SapBridgeError::Internal(_) => "internal",
    }
}
