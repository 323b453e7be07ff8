//! Layered client settings

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use loan_chat_core::AgentKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{endpoints, env, session, timeouts};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Backend base URL
    pub base_url: String,
    /// Optional mount prefix, e.g. "loan" or "/api/v1"
    pub prefix: String,
    /// Also try `/api<path>` when the base is not already a proxy mount
    pub include_api_variant: bool,
    /// Request timeout (ms)
    pub timeout_ms: u64,
    /// Connect timeout (ms)
    pub connect_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: endpoints::BACKEND_DEFAULT.to_string(),
            prefix: String::new(),
            include_api_variant: true,
            timeout_ms: timeouts::REQUEST_MS,
            connect_timeout_ms: timeouts::CONNECT_MS,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Conversation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Where the customer identifier is persisted
    pub customer_id_path: PathBuf,
    /// Agent selected when a session starts
    pub default_agent: AgentKind,
    /// Free-form context forwarded with every turn
    pub user_context: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            customer_id_path: home.join(session::STATE_DIR).join(session::CUSTOMER_ID_FILE),
            default_agent: AgentKind::Master,
            user_context: None,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Complete client settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Load settings with an explicit environment map (`None` reads the process environment)
    pub fn load_with_env(
        path: Option<&Path>,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(env::PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env_vars.clone()),
        );

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply_aliases(|key| match &env_vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        });
        settings.validate()?;

        tracing::debug!(
            base_url = %settings.api.base_url,
            prefix = %settings.api.prefix,
            timeout_ms = settings.api.timeout_ms,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Apply the short `LOAN_CHAT_API_URL` / `LOAN_CHAT_BACKEND_URL` / `LOAN_CHAT_API_PREFIX` aliases
    fn apply_aliases(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let url = [env::API_URL, env::BACKEND_URL]
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty());
        if let Some(url) = url {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(prefix) = lookup(env::API_PREFIX) {
            self.api.prefix = prefix.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                base
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Invalid("api.timeout_ms must be positive".to_string()));
        }
        if self.session.customer_id_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "session.customer_id_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
