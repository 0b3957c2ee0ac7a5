//! ConversationSession aggregate.
//!
//! Holds one user's identity, transcript, question cursor and step, and
//! owns every rule about how those may change.

use chrono::NaiveDate;
use serde::Serialize;

use super::{ConversationStep, Message, QuestionBank, QuestionnaireError, UserIdentity};
use crate::domain::foundation::StateMachine;

/// Transcript length at which the conversation is summarized.
pub const MAX_MESSAGES: usize = 10;

/// In-memory record of one questionnaire run.
///
/// # Invariants
///
/// - `CollectIdentity` ⇒ no identity, empty transcript, cursor 0
/// - `Converse` / `Summarize` ⇒ identity present
/// - `transcript.len() <= MAX_MESSAGES`
/// - `question_cursor <= QuestionBank::len()` and advances by one per
///   assistant message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConversationSession {
    identity: Option<UserIdentity>,
    transcript: Vec<Message>,
    question_cursor: usize,
    step: ConversationStep,
}

impl ConversationSession {
    /// Creates an empty session waiting for identity.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// CollectIdentity → Converse.
    ///
    /// Records the identity and greets the user with the first question.
    ///
    /// # Errors
    ///
    /// - `WrongStep` unless collecting identity
    /// - `Validation` for a blank name or a missing date of birth
    pub fn begin(
        &mut self,
        name: &str,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<(), QuestionnaireError> {
        self.ensure_step(ConversationStep::CollectIdentity)?;
        let identity = UserIdentity::new(name, date_of_birth)?;
        let first_question = QuestionBank::get(0).ok_or(QuestionnaireError::QuestionsExhausted)?;
        let greeting = Message::assistant(format!("Hello {}! {}", identity.name(), first_question))?;
        let next = self.step.transition_to(ConversationStep::Converse)?;

        self.identity = Some(identity);
        self.transcript.push(greeting);
        self.question_cursor = 1;
        self.step = next;
        Ok(())
    }

    /// Converse → Converse: record one answer and ask the next question.
    ///
    /// The follow-up question is skipped when the answer fills the
    /// transcript or the bank is exhausted, leaving a trailing user message.
    ///
    /// # Errors
    ///
    /// - `WrongStep` unless conversing
    /// - `TranscriptFull` / `QuestionsExhausted` when nothing more may be asked
    /// - `Validation` for blank text
    pub fn answer(&mut self, text: &str) -> Result<(), QuestionnaireError> {
        self.ensure_step(ConversationStep::Converse)?;
        if self.transcript.len() >= MAX_MESSAGES {
            return Err(QuestionnaireError::TranscriptFull { max: MAX_MESSAGES });
        }
        if QuestionBank::is_exhausted(self.question_cursor) {
            return Err(QuestionnaireError::QuestionsExhausted);
        }
        let reply = Message::user(text)?;
        self.transcript.push(reply);

        if self.transcript.len() < MAX_MESSAGES {
            if let Some(question) = QuestionBank::get(self.question_cursor) {
                self.transcript.push(Message::assistant(question)?);
                self.question_cursor += 1;
            }
        }
        Ok(())
    }

    /// True when the transcript cap forces the move to Summarize.
    pub fn needs_summary(&self) -> bool {
        self.step == ConversationStep::Converse && self.transcript.len() >= MAX_MESSAGES
    }

    /// Converse → Summarize, either forced by the cap or requested early.
    pub fn finish(&mut self) -> Result<(), QuestionnaireError> {
        self.ensure_step(ConversationStep::Converse)?;
        self.step = self.step.transition_to(ConversationStep::Summarize)?;
        Ok(())
    }

    /// Summarize → CollectIdentity, discarding everything.
    pub fn reset(&mut self) -> Result<(), QuestionnaireError> {
        self.ensure_step(ConversationStep::Summarize)?;
        self.step.transition_to(ConversationStep::CollectIdentity)?;
        *self = Self::new();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn question_cursor(&self) -> usize {
        self.question_cursor
    }

    pub fn step(&self) -> ConversationStep {
        self.step
    }

    /// Number of messages exchanged so far, shown as `n/10`.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// True when an answer submitted now would pass every guard but text.
    pub fn accepts_response(&self) -> bool {
        self.step.accepts_responses()
            && self.transcript.len() < MAX_MESSAGES
            && !QuestionBank::is_exhausted(self.question_cursor)
    }

    /// The question currently awaiting an answer.
    pub fn current_question(&self) -> Option<&'static str> {
        self.question_cursor
            .checked_sub(1)
            .and_then(QuestionBank::get)
    }

    fn ensure_step(&self, expected: ConversationStep) -> Result<(), QuestionnaireError> {
        if self.step != expected {
            return Err(QuestionnaireError::wrong_step(expected, self.step));
        }
        Ok(())
    }
}
