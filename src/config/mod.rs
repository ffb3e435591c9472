//! Configuration management module.
//!
//! Supports loading configuration from:
//! - a `.env` file in the working directory (if present)
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `INTERCOM__<SECTION>__<KEY>` pattern

mod server;
mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use server::ServerConfig;
pub use storage::{FileStorageConfig, StorageBackend, StorageConfig};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Number registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Telephony document configuration.
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{INTERCOM_PROFILE}.toml` (if `INTERCOM_PROFILE` is set)
    /// 3. Environment variables with `INTERCOM__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is fine, the process environment still applies
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("INTERCOM_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // INTERCOM__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("INTERCOM")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("registry.initial_numbers"),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.storage.validate()?;
        self.auth.validate()?;
        self.telephony.validate()?;

        Ok(())
    }
}

/// Number registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// Numbers installed when the store holds no registry yet.
    #[serde(default)]
    pub initial_numbers: Vec<String>,
}

/// Longest accepted admin session lifetime, in seconds (one year).
pub const MAX_SESSION_TTL: u64 = 365 * 24 * 60 * 60;

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Username of the single administrator identity.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Password of the administrator identity.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Shared secret for the API and mobile surfaces.
    #[serde(default = "default_api_token")]
    pub api_token: String,

    /// Admin session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl: u64,

    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin_change_me_in_production".to_string()
}

fn default_api_token() -> String {
    "api_change_me_in_production".to_string()
}

const fn default_session_ttl() -> u64 {
    12 * 60 * 60 // 12 hours
}

fn default_cookie_name() -> String {
    "intercom_session".to_string()
}

impl AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_username.is_empty() || self.admin_password.is_empty() {
            return Err(ConfigError::Message(
                "auth.admin_username and auth.admin_password cannot be empty".to_string(),
            ));
        }
        if self.api_token.is_empty() {
            return Err(ConfigError::Message(
                "auth.api_token cannot be empty".to_string(),
            ));
        }
        if self.session_ttl == 0 || self.session_ttl > MAX_SESSION_TTL {
            return Err(ConfigError::Message(format!(
                "auth.session_ttl must be within 1..={MAX_SESSION_TTL} seconds"
            )));
        }
        if self.cookie_name.is_empty()
            || !self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Message(format!(
                "auth.cookie_name is not a valid cookie name: {}",
                self.cookie_name
            )));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            api_token: default_api_token(),
            session_ttl: default_session_ttl(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

/// Telephony document configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// URL the provider calls with the dial outcome.
    #[serde(default = "default_callback_url")]
    pub callback_url: String,

    /// Seconds each destination rings before the dial gives up.
    #[serde(default = "default_dial_timeout")]
    pub dial_timeout: u32,

    /// Caller id presented to the destinations (the provider number if unset).
    #[serde(default)]
    pub caller_id: Option<String>,

    /// Announcement spoken when nobody picks up.
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,

    /// Voice used for the announcement.
    #[serde(default = "default_voice")]
    pub voice: String,
}

/// Inclusive bounds the provider accepts for a dial timeout.
pub const DIAL_TIMEOUT_RANGE: std::ops::RangeInclusive<u32> = 5..=600;

fn default_callback_url() -> String {
    "/call_end".to_string()
}

const fn default_dial_timeout() -> u32 {
    20
}

fn default_fallback_message() -> String {
    "Sorry, no one is home right now. Please try again later.".to_string()
}

fn default_voice() -> String {
    "alice".to_string()
}

impl TelephonyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.callback_url.is_empty() {
            return Err(ConfigError::Message(
                "telephony.callback_url cannot be empty".to_string(),
            ));
        }
        if !DIAL_TIMEOUT_RANGE.contains(&self.dial_timeout) {
            return Err(ConfigError::Message(format!(
                "telephony.dial_timeout must be within {}..={}",
                DIAL_TIMEOUT_RANGE.start(),
                DIAL_TIMEOUT_RANGE.end()
            )));
        }
        Ok(())
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            callback_url: default_callback_url(),
            dial_timeout: default_dial_timeout(),
            caller_id: None,
            fallback_message: default_fallback_message(),
            voice: default_voice(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}
