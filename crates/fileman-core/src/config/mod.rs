//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file merged with `FILEMAN__*` environment variables. Every
//! section carries serde defaults so an empty source is a valid config.

pub mod account;
pub mod logging;
pub mod server;
pub mod session;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::account::AccountConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::session::{AfterLogin, SessionConfig};
pub use self::upload::{UploadConfig, UploadMode};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote DAV server settings.
    pub server: ServerConfig,
    /// Account root and path exclusions.
    pub account: AccountConfig,
    /// Session cookie and login settings.
    pub session: SessionConfig,
    /// Upload settings.
    pub upload: UploadConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// `path` is given without requiring the file to exist; environment
    /// variables prefixed with `FILEMAN__` override file values, e.g.
    /// `FILEMAN__SERVER__BASE_URL`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FILEMAN")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("account.excluded_paths")
                    .with_list_parse_key("account.extra_denylist")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
