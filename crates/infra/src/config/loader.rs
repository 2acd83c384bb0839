//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SAPBRIDGE_SAP_BASE_URL`: SAP REST base URL (required)
//! - `SAPBRIDGE_API_SECRET`: HMAC secret for Bearer tokens (required)
//! - `SAPBRIDGE_SAP_APP_ID`: Application id sent with commands
//! - `SAPBRIDGE_SAP_CLIENT`: SAP client number
//! - `SAPBRIDGE_SAP_TIMEOUT_SECS`: Per-call timeout in seconds (default 600)
//! - `SAPBRIDGE_ENFORCE_EXPIRY`: Reject expired tokens (true/false)
//! - `SAPBRIDGE_BIND_ADDR`: Gateway listen address
//! - `SAPBRIDGE_JSON_LOGS`: Emit JSON log lines (true/false)
//! - `SAPBRIDGE_TIMEZONE`: IANA zone for SAP dates (default `UTC`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./sapbridge.json` or `./sapbridge.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use sapbridge_domain::{
    AuthConfig, Config, DateConfig, Result, SapBridgeError, SapConfig, ServerConfig,
    DEFAULT_BIND_ADDR, DEFAULT_SAP_TIMEOUT_SECS, DEFAULT_TIMEZONE,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SapBridgeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SAPBRIDGE_SAP_BASE_URL` and `SAPBRIDGE_API_SECRET` must be present;
/// everything else falls back to its default.
///
/// # Errors
/// Returns `SapBridgeError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("SAPBRIDGE_SAP_BASE_URL")?;
    let api_secret = env_var("SAPBRIDGE_API_SECRET")?;

    let timeout_seconds = match std::env::var("SAPBRIDGE_SAP_TIMEOUT_SECS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| {
            SapBridgeError::Config(format!("Invalid SAP timeout: {}", e))
        })?,
        Err(_) => DEFAULT_SAP_TIMEOUT_SECS,
    };

    let config = Config {
        sap: SapConfig {
            base_url: normalize_base_url(&base_url),
            app_id: std::env::var("SAPBRIDGE_SAP_APP_ID").unwrap_or_default(),
            sap_client: std::env::var("SAPBRIDGE_SAP_CLIENT").unwrap_or_default(),
            timeout_seconds,
        },
        auth: AuthConfig {
            api_secret,
            enforce_expiry: env_bool("SAPBRIDGE_ENFORCE_EXPIRY", false),
        },
        server: ServerConfig {
            bind_addr: std::env::var("SAPBRIDGE_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            json_logs: env_bool("SAPBRIDGE_JSON_LOGS", false),
        },
        dates: DateConfig {
            timezone: std::env::var("SAPBRIDGE_TIMEZONE")
                .unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
        },
    };

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SapBridgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SapBridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SapBridgeError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SapBridgeError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    config.sap.base_url = normalize_base_url(&config.sap.base_url);
    validate(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SapBridgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SapBridgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SapBridgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("sapbridge.json"),
        dir.join("sapbridge.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Base URLs are joined with relative endpoint paths, so they must end in `/`.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

fn validate(config: Config) -> Result<Config> {
    if config.sap.base_url.trim_end_matches('/').is_empty() {
        return Err(SapBridgeError::Config("SAP base URL must not be empty".to_string()));
    }
    if config.auth.api_secret.is_empty() {
        return Err(SapBridgeError::Config("API secret must not be empty".to_string()));
    }
    if config.sap.timeout_seconds == 0 {
        return Err(SapBridgeError::Config("SAP timeout must be at least one second".to_string()));
    }
    Ok(config)
}

/// Get required environment variable
///
/// # Errors
/// Returns `SapBridgeError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SapBridgeError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
