//! Typed application configuration.
//!
//! Loaded from an optional TOML file plus `SENTINEL__*` environment
//! overrides (e.g. `SENTINEL__AUTH__MODE=bypassed`). Validation happens
//! at load time so a misconfigured service refuses to start instead of
//! misbehaving later.

use config::{Config, ConfigError, Environment as EnvSource, File};
use serde::Deserialize;

/// Default path of the configuration file, relative to the working dir.
const DEFAULT_CONFIG_FILE: &str = "sentinel.toml";

/// Deployment environment. Production forbids the auth bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    Development,
    Production,
}

/// How management reads are authenticated.
///
/// `Bypassed` substitutes a fixed development identity and is only
/// honored outside production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Enforced,
    Bypassed,
}

/// Which categories the ingestion path marks as detected.
///
/// `Standard` runs the inspection engine and carries forward only the
/// categories that actually fired. `FlagAll` reports every registered
/// category as detected - a maximal-alert demonstration mode, kept as an
/// explicit switch because both behaviors exist in the system's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    Standard,
    FlagAll,
}

/// What the audit entry stores as content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRetention {
    /// Retain the inspected text verbatim.
    Verbatim,
    /// Store only a `sha256:<hex>` digest of the inspected text.
    Redacted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Shared secret for session-token signatures. Required when
    /// `mode = "enforced"`.
    pub session_secret: String,
    /// Maximum session-token age in seconds.
    pub token_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Enforced,
            session_secret: String::new(),
            token_ttl_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub mode: DetectionMode,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::Standard,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Origin region label recorded on every entry.
    pub region: String,
    /// Server-enforced ceiling for `limit` on the listing endpoint.
    pub max_page_size: usize,
    pub retention: ContentRetention,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            max_page_size: 500,
            retention: ContentRetention::Verbatim,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub environment: RuntimeEnv,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub detection: DetectionConfig,
    pub audit: AuditConfig,
}

impl Default for RuntimeEnv {
    fn default() -> Self {
        RuntimeEnv::Development
    }
}

impl AppConfig {
    /// Load from `sentinel.toml` (if present) and the environment, then
    /// validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from an explicit file path (optional) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                EnvSource::with_prefix("SENTINEL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that must never reach a running service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.mode == AuthMode::Bypassed && self.environment == RuntimeEnv::Production {
            return Err(ConfigError::Message(
                "auth.mode = \"bypassed\" is not allowed in production".to_string(),
            ));
        }

        if self.auth.mode == AuthMode::Enforced && self.auth.session_secret.is_empty() {
            return Err(ConfigError::Message(
                "auth.session_secret is required when auth.mode = \"enforced\"".to_string(),
            ));
        }

        if self.audit.max_page_size == 0 {
            return Err(ConfigError::Message(
                "audit.max_page_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
