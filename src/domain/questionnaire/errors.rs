//! Questionnaire-specific error types.

use thiserror::Error;

use super::ConversationStep;
use crate::domain::foundation::ValidationError;

/// Reasons a questionnaire transition guard refused to fire.
///
/// None of these are user-facing failures: the controller logs them and
/// leaves the session where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionnaireError {
    #[error("Operation requires step {expected:?}, session is in {actual:?}")]
    WrongStep {
        expected: ConversationStep,
        actual: ConversationStep,
    },

    #[error("Transcript already holds the maximum of {max} messages")]
    TranscriptFull { max: usize },

    #[error("All scripted questions have been asked")]
    QuestionsExhausted,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl QuestionnaireError {
    pub fn wrong_step(expected: ConversationStep, actual: ConversationStep) -> Self {
        QuestionnaireError::WrongStep { expected, actual }
    }
}
