//! Configuration for the loan chat client
//!
//! Settings are layered: built-in defaults, then an optional TOML/YAML
//! file, then `LOAN_CHAT__*` environment variables, then the short
//! `LOAN_CHAT_API_URL` style aliases.

pub mod constants;
pub mod settings;

pub use settings::{ApiSettings, ConfigError, LoggingSettings, SessionSettings, Settings};
