//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WELLBEING_CHAT` prefix and nested values use double underscores as separators.
//! The document store connection string keeps its conventional name, `MONGODB_URI`.
//!
//! # Example
//!
//! ```no_run
//! use wellbeing_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable holding the MongoDB connection string.
pub const MONGODB_URI_VAR: &str = "MONGODB_URI";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WELLBEING_CHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Takes `database.uri` from `MONGODB_URI` when set
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLBEING_CHAT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MONGODB_URI=mongodb+srv://...` -> `database.uri = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// A missing `MONGODB_URI` is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLBEING_CHAT")
                    .separator("__"),
            )
            .set_override_option("database.uri", std::env::var(MONGODB_URI_VAR).ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
