//! Questionnaire module - the wellbeing conversation itself.
//!
//! # Module Organization
//!
//! - `question_bank` - The ten scripted questions
//! - `message` - Transcript entries
//! - `identity` - Name and date of birth
//! - `step` - CollectIdentity / Converse / Summarize state machine
//! - `session` - ConversationSession aggregate with transition guards
//! - `sentiment` - Keyword-count classifier
//! - `record` - Persisted ChatRecord

mod errors;
mod identity;
mod message;
mod question_bank;
mod record;
mod sentiment;
mod session;
mod step;

pub use errors::QuestionnaireError;
pub use identity::UserIdentity;
pub use message::{Message, Role};
pub use question_bank::QuestionBank;
pub use record::ChatRecord;
pub use sentiment::{SentimentClassifier, SentimentLabel, SentimentScore};
pub use session::{ConversationSession, MAX_MESSAGES};
pub use step::ConversationStep;
