//! In-Memory ChatRecord Store Adapter
//!
//! Keeps saved chat records in memory.
//! Useful for testing and local development without a database.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::questionnaire::ChatRecord;
use crate::ports::{ChatRecordStore, PersistenceError};

/// In-memory storage for chat records
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatRecordStore {
    records: Arc<RwLock<Vec<ChatRecord>>>,
}

impl InMemoryChatRecordStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record saved so far, in insertion order
    pub async fn records(&self) -> Vec<ChatRecord> {
        self.records.read().await.clone()
    }

    /// Get the number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing has been saved
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ChatRecordStore for InMemoryChatRecordStore {
    async fn insert(&self, record: &ChatRecord) -> Result<(), PersistenceError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
