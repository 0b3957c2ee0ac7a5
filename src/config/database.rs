//! Document store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Part of the save budget reserved for closing the client.
const SHUTDOWN_HEADROOM: Duration = Duration::from_secs(1);

/// MongoDB configuration
///
/// `uri` is optional on purpose: a missing connection string only makes the
/// final save fail, it never stops the service from starting.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string (`MONGODB_URI`)
    #[serde(default)]
    pub uri: Option<SecretString>,

    /// Database that holds the chats collection
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Collection that receives one document per finished chat
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Connect and server-selection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Upper bound for a whole save attempt in seconds
    #[serde(default = "default_save_timeout")]
    pub save_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get save timeout as Duration
    pub fn save_timeout(&self) -> Duration {
        Duration::from_secs(self.save_timeout_secs)
    }

    /// Bound for ping plus insert inside the store. Leaves
    /// `SHUTDOWN_HEADROOM` of the save budget for closing the client.
    pub fn operation_timeout(&self) -> Duration {
        self.save_timeout().saturating_sub(SHUTDOWN_HEADROOM)
    }

    /// True when a non-blank connection string is present
    pub fn has_uri(&self) -> bool {
        self.uri
            .as_ref()
            .is_some_and(|uri| !uri.expose_secret().trim().is_empty())
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.database_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__DATABASE_NAME"));
        }
        if self.collection.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__COLLECTION"));
        }
        if self.connect_timeout_secs == 0 || self.save_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.connect_timeout_secs >= self.save_timeout_secs {
            return Err(ValidationError::ConnectTimeoutExceedsSaveTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database_name: default_database_name(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout(),
            save_timeout_secs: default_save_timeout(),
        }
    }
}

fn default_database_name() -> String {
    "wellbeing_chatbot".to_string()
}

fn default_collection() -> String {
    "chats".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_save_timeout() -> u64 {
    10
}
