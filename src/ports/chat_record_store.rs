//! ChatRecordStore port - Interface for persisting finished conversations.
//!
//! Implementations write exactly one `ChatRecord` per call and report
//! failures through `PersistenceError`. Callers that only care whether the
//! save happened go through `PersistenceGateway`, which collapses the error
//! to a boolean.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::questionnaire::ChatRecord;

/// Errors that can occur while saving a chat record.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("No document store connection string configured")]
    NotConfigured,

    #[error("Invalid connection string: {0}")]
    InvalidUri(String),

    #[error("Failed to connect to document store: {0}")]
    Connection(String),

    #[error("Document store did not answer ping: {0}")]
    Ping(String),

    #[error("Failed to serialize chat record: {0}")]
    Serialization(String),

    #[error("Failed to insert chat record: {0}")]
    Insert(String),

    #[error("Save did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Save task failed unexpectedly: {0}")]
    Unexpected(String),
}

impl PersistenceError {
    /// Short stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PersistenceError::NotConfigured => "not_configured",
            PersistenceError::InvalidUri(_) => "invalid_uri",
            PersistenceError::Connection(_) => "connection",
            PersistenceError::Ping(_) => "ping",
            PersistenceError::Serialization(_) => "serialization",
            PersistenceError::Insert(_) => "insert",
            PersistenceError::Timeout(_) => "timeout",
            PersistenceError::Unexpected(_) => "unexpected",
        }
    }
}

/// Port for writing finished conversations to a document store.
#[async_trait]
pub trait ChatRecordStore: Send + Sync {
    /// Insert one record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the store is unconfigured, unreachable,
    /// or rejects the insert.
    async fn insert(&self, record: &ChatRecord) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_message_is_readable() {
        let err = PersistenceError::NotConfigured;
        assert!(err.to_string().contains("connection string"));
        assert_eq!(err.kind(), "not_configured");
    }

    #[test]
    fn timeout_reports_duration() {
        let err = PersistenceError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("10s"));
        assert_eq!(err.kind(), "timeout");
    }
}
