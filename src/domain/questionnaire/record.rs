//! ChatRecord - the persisted form of a finished questionnaire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Message, SentimentLabel, UserIdentity};
use crate::domain::foundation::Timestamp;

/// Document written once per completed session.
///
/// Field names match the stored document shape. `tools_used` is always
/// empty and kept for forward compatibility of existing readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub user_name: String,
    pub date_of_birth: NaiveDate,
    pub chat_history: Vec<Message>,
    pub final_sentiment: SentimentLabel,
    pub timestamp: Timestamp,
    pub tools_used: Vec<String>,
}

impl ChatRecord {
    /// Snapshots a finished session.
    pub fn new(
        identity: &UserIdentity,
        transcript: &[Message],
        final_sentiment: SentimentLabel,
        saved_at: Timestamp,
    ) -> Self {
        Self {
            user_name: identity.name().to_string(),
            date_of_birth: identity.date_of_birth(),
            chat_history: transcript.to_vec(),
            final_sentiment,
            timestamp: saved_at,
            tools_used: Vec::new(),
        }
    }
}
