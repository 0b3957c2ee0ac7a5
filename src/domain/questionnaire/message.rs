//! Message entity for the questionnaire transcript.
//!
//! Messages are immutable records of user/assistant exchanges. The
//! transcript only ever grows; insertion order defines the conversation.

use crate::domain::foundation::{Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Free-text answer typed by the user.
    User,
    /// Scripted question asked by the bot.
    Assistant,
}

/// An immutable message within a transcript.
///
/// # Invariants
///
/// - `text` is non-empty after trimming
/// - `timestamp` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
    timestamp: Timestamp,
}

impl Message {
    /// Creates a new message with the given role and text.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if text is empty or whitespace
    pub fn new(role: Role, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }

        Ok(Self {
            role,
            text,
            timestamp: Timestamp::now(),
        })
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}
