//! PersistenceGateway - best-effort save of a finished conversation.
//!
//! Callers get a plain `bool`. Every failure (missing configuration,
//! unreachable store, rejected insert, timeout, panic inside the store) is
//! logged here and reported as `false`. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::Timestamp;
use crate::domain::questionnaire::{ChatRecord, Message, SentimentLabel, UserIdentity};
use crate::ports::{ChatRecordStore, PersistenceError};

/// Wraps a `ChatRecordStore` with a time bound and failure collapsing.
pub struct PersistenceGateway {
    store: Arc<dyn ChatRecordStore>,
    timeout: Duration,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn ChatRecordStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Attempts the save once and reports exactly what went wrong.
    ///
    /// The insert runs on its own task so a panicking store surfaces as
    /// `Unexpected` instead of unwinding into the caller.
    pub async fn try_save(
        &self,
        identity: &UserIdentity,
        transcript: &[Message],
        sentiment: SentimentLabel,
    ) -> Result<(), PersistenceError> {
        let record = ChatRecord::new(identity, transcript, sentiment, Timestamp::now());
        let store = Arc::clone(&self.store);

        let task = tokio::spawn(async move { store.insert(&record).await });
        let abort = task.abort_handle();

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(PersistenceError::Unexpected(join_error.to_string())),
            Err(_) => {
                abort.abort();
                Err(PersistenceError::Timeout(self.timeout))
            }
        }
    }

    /// Saves the conversation, returning `true` only if the record was stored.
    pub async fn save(
        &self,
        identity: &UserIdentity,
        transcript: &[Message],
        sentiment: SentimentLabel,
    ) -> bool {
        match self.try_save(identity, transcript, sentiment).await {
            Ok(()) => {
                tracing::info!(
                    messages = transcript.len(),
                    sentiment = %sentiment,
                    "Chat record saved"
                );
                true
            }
            Err(e) => {
                tracing::warn!(error.kind = e.kind(), error = %e, "Chat record not saved");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryChatRecordStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FailingStore;

    #[async_trait]
    impl ChatRecordStore for FailingStore {
        async fn insert(&self, _record: &ChatRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Insert("Simulated insert failure".to_string()))
        }
    }

    struct SlowStore;

    #[async_trait]
    impl ChatRecordStore for SlowStore {
        async fn insert(&self, _record: &ChatRecord) -> Result<(), PersistenceError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    struct PanickingStore;

    #[async_trait]
    impl ChatRecordStore for PanickingStore {
        async fn insert(&self, _record: &ChatRecord) -> Result<(), PersistenceError> {
            panic!("driver bug");
        }
    }

    fn identity() -> UserIdentity {
        UserIdentity::new("Ana", NaiveDate::from_ymd_opt(2000, 1, 1)).unwrap()
    }

    fn transcript() -> Vec<Message> {
        vec![
            Message::assistant("Hello Ana! How have you been feeling lately?").unwrap(),
            Message::user("great").unwrap(),
        ]
    }

    fn gateway(store: Arc<dyn ChatRecordStore>) -> PersistenceGateway {
        PersistenceGateway::new(store, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn returns_true_and_stores_record() {
        let store = Arc::new(InMemoryChatRecordStore::new());
        let messages = transcript();
        let saved = gateway(store.clone())
            .save(&identity(), &messages, SentimentLabel::Positive)
            .await;

        assert!(saved);
        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_name, "Ana");
        assert_eq!(records[0].chat_history, messages);
        assert_eq!(records[0].final_sentiment, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn insert_failure_is_false() {
        let saved = gateway(Arc::new(FailingStore))
            .save(&identity(), &transcript(), SentimentLabel::Positive)
            .await;
        assert!(!saved);
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let result = gateway(Arc::new(SlowStore))
            .try_save(&identity(), &transcript(), SentimentLabel::Negative)
            .await;
        assert!(matches!(result, Err(PersistenceError::Timeout(_))));
    }

    #[tokio::test]
    async fn panicking_store_is_contained() {
        let g = gateway(Arc::new(PanickingStore));
        let result = g
            .try_save(&identity(), &transcript(), SentimentLabel::Positive)
            .await;
        assert!(matches!(result, Err(PersistenceError::Unexpected(_))));
        assert!(!g.save(&identity(), &transcript(), SentimentLabel::Positive).await);
    }

    #[tokio::test]
    async fn record_timestamp_is_taken_at_save_time() {
        let store = Arc::new(InMemoryChatRecordStore::new());
        let messages = transcript();
        let before = Timestamp::now();
        gateway(store.clone())
            .save(&identity(), &messages, SentimentLabel::Positive)
            .await;

        let records = store.records().await;
        assert!(!records[0].timestamp.is_before(&before));
        assert!(!records[0].timestamp.is_before(messages[1].timestamp()));
    }
}
