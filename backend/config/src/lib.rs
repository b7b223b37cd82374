//! `recibo-config` — process-wide configuration for the receipt service.
//!
//! The config is read from environment variables once at startup and passed
//! explicitly into the providers and the gateway; nothing reads the
//! environment at call time.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Value, json};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Recibo runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Include upstream error detail in error responses
    pub debug: bool,
    /// Google API key, shared by the Vision and Gemini clients
    pub google_api_key: Option<String>,
    /// Path to a Google service-account credentials file (presence only;
    /// feeds the health report)
    pub google_credentials_path: Option<String>,
    /// Upload size limit for `/process-receipt/`
    pub max_upload_bytes: usize,
    /// Per-call deadline applied to each outbound provider request
    pub upstream_timeout_secs: u64,
    /// Log level fallback when RUST_LOG is unset
    pub log_level: String,
    /// Directory for the rolling JSON log file
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            debug: false,
            google_api_key: None,
            google_credentials_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Self {
        let defaults = Config::default();
        Self {
            bind_address: env
                .get("RECIBO_BIND")
                .cloned()
                .unwrap_or(defaults.bind_address),
            port: env
                .get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            debug: env
                .get("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            google_api_key: env.get("GOOGLE_API_KEY").filter(|v| !v.is_empty()).cloned(),
            google_credentials_path: env
                .get("GOOGLE_APPLICATION_CREDENTIALS")
                .filter(|v| !v.is_empty())
                .cloned(),
            max_upload_bytes: env
                .get("RECIBO_MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            upstream_timeout_secs: env
                .get("RECIBO_UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            log_level: env
                .get("RUST_LOG")
                .cloned()
                .unwrap_or(defaults.log_level),
            log_dir: env.get("RECIBO_LOG_DIR").cloned().unwrap_or(defaults.log_dir),
        }
    }

    /// Whether the OCR upstream has credentials to work with.
    ///
    /// Either the shared API key or a credentials file that actually exists
    /// counts; the health endpoint only does this presence check, never a
    /// round trip.
    pub fn vision_configured(&self) -> bool {
        self.google_api_key.is_some()
            || self
                .google_credentials_path
                .as_deref()
                .is_some_and(|p| Path::new(p).exists())
    }

    /// Whether the structuring upstream has credentials to work with.
    pub fn generative_configured(&self) -> bool {
        self.google_api_key.is_some()
    }

    /// Safe-to-log snapshot of the config with the API key masked.
    pub fn redacted(&self) -> Value {
        json!({
            "bind_address": self.bind_address,
            "port": self.port,
            "debug": self.debug,
            "google_api_key": self.google_api_key.as_deref().map(mask_secret),
            "google_credentials_path": self.google_credentials_path,
            "max_upload_bytes": self.max_upload_bytes,
            "upstream_timeout_secs": self.upstream_timeout_secs,
            "log_level": self.log_level,
            "log_dir": self.log_dir,
        })
    }
}

/// Mask a secret, keeping a short prefix as a which-key-is-this hint.
fn mask_secret(s: &str) -> String {
    if s.len() > 4 {
        format!("{}***", &s[..4])
    } else {
        "***".to_string()
    }
}
