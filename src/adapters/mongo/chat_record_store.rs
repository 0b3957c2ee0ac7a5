//! MongoDB implementation of ChatRecordStore.
//!
//! Each save opens its own client, pings the server, inserts one document
//! and shuts the client down again. Saves happen once per finished chat, so
//! there is no pool to keep warm.

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::domain::questionnaire::ChatRecord;
use crate::ports::{ChatRecordStore, PersistenceError};

const APP_NAME: &str = "wellbeing-chat";

/// MongoDB implementation of ChatRecordStore.
#[derive(Debug, Clone)]
pub struct MongoChatRecordStore {
    uri: Option<SecretString>,
    database_name: String,
    collection: String,
    connect_timeout: Duration,
    operation_timeout: Duration,
}

impl MongoChatRecordStore {
    /// Creates a store from configuration. Never fails; a bad or missing
    /// connection string is reported by `insert`.
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            uri: config.uri.clone(),
            database_name: config.database_name.clone(),
            collection: config.collection.clone(),
            connect_timeout: config.connect_timeout(),
            operation_timeout: config.operation_timeout(),
        }
    }

    /// Overrides the bound on ping plus insert.
    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    async fn connect(&self) -> Result<Client, PersistenceError> {
        let uri = self
            .uri
            .as_ref()
            .map(|uri| uri.expose_secret().trim())
            .filter(|uri| !uri.is_empty())
            .ok_or(PersistenceError::NotConfigured)?;

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| PersistenceError::InvalidUri(e.to_string()))?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);
        options.app_name = Some(APP_NAME.to_string());

        Client::with_options(options).map_err(|e| PersistenceError::Connection(e.to_string()))
    }

    async fn ping_and_insert(
        &self,
        client: &Client,
        record: &ChatRecord,
    ) -> Result<(), PersistenceError> {
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| PersistenceError::Ping(e.to_string()))?;

        let document = mongodb::bson::to_document(record)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        let result = client
            .database(&self.database_name)
            .collection::<Document>(&self.collection)
            .insert_one(document, None)
            .await
            .map_err(|e| PersistenceError::Insert(e.to_string()))?;

        tracing::debug!(inserted_id = %result.inserted_id, "Chat record inserted");
        Ok(())
    }
}

#[async_trait]
impl ChatRecordStore for MongoChatRecordStore {
    async fn insert(&self, record: &ChatRecord) -> Result<(), PersistenceError> {
        let client = self.connect().await?;
        let result = tokio::time::timeout(
            self.operation_timeout,
            self.ping_and_insert(&client, record),
        )
        .await
        .unwrap_or(Err(PersistenceError::Timeout(self.operation_timeout)));
        // Shut down on every path, timeouts included.
        client.shutdown().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::questionnaire::{Message, SentimentLabel, UserIdentity};
    use chrono::NaiveDate;

    fn record() -> ChatRecord {
        let identity = UserIdentity::new("Ana", NaiveDate::from_ymd_opt(2000, 1, 1)).unwrap();
        let transcript = vec![Message::assistant("Hello Ana! How have you been feeling lately?").unwrap()];
        ChatRecord::new(&identity, &transcript, SentimentLabel::Positive, Timestamp::now())
    }

    fn store_with_uri(uri: Option<&str>) -> MongoChatRecordStore {
        let config = DatabaseConfig {
            uri: uri.map(|u| SecretString::new(u.to_string())),
            connect_timeout_secs: 1,
            ..Default::default()
        };
        MongoChatRecordStore::new(&config)
    }

    #[tokio::test]
    async fn missing_uri_is_not_configured() {
        let result = store_with_uri(None).insert(&record()).await;
        assert!(matches!(result, Err(PersistenceError::NotConfigured)));
    }

    #[tokio::test]
    async fn blank_uri_is_not_configured() {
        let result = store_with_uri(Some("   ")).insert(&record()).await;
        assert!(matches!(result, Err(PersistenceError::NotConfigured)));
    }

    #[tokio::test]
    async fn wrong_scheme_is_invalid_uri() {
        let result = store_with_uri(Some("http://localhost:27017")).insert(&record()).await;
        assert!(matches!(result, Err(PersistenceError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn unreachable_server_fails_ping() {
        let result = store_with_uri(Some("mongodb://127.0.0.1:1/?directConnection=true"))
            .insert(&record())
            .await;
        assert!(matches!(result, Err(PersistenceError::Ping(_))));
    }

    #[tokio::test]
    async fn slow_server_selection_times_out_inside_store() {
        let started = std::time::Instant::now();
        let config = DatabaseConfig {
            uri: Some(SecretString::new(
                "mongodb://127.0.0.1:1/?directConnection=true".to_string(),
            )),
            connect_timeout_secs: 5,
            ..Default::default()
        };
        let result = MongoChatRecordStore::new(&config)
            .with_operation_timeout(Duration::from_millis(200))
            .insert(&record())
            .await;

        assert!(matches!(result, Err(PersistenceError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn record_converts_to_bson_document() {
        let document = mongodb::bson::to_document(&record()).unwrap();
        assert_eq!(document.get_str("user_name").unwrap(), "Ana");
        assert_eq!(document.get_str("date_of_birth").unwrap(), "2000-01-01");
        assert_eq!(document.get_str("final_sentiment").unwrap(), "Positive");
        assert!(document.get_str("timestamp").is_ok());
        assert!(document.get_array("tools_used").unwrap().is_empty());
        assert_eq!(document.get_array("chat_history").unwrap().len(), 1);
    }
}
