//! Questionnaire step machine.
//!
//! A session moves CollectIdentity → Converse → Summarize, and a
//! "start new" request takes Summarize back to CollectIdentity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The step a questionnaire session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    /// Waiting for name and date of birth.
    #[default]
    CollectIdentity,

    /// Asking scripted questions and collecting answers.
    Converse,

    /// Sentiment computed and save attempted; read-only until reset.
    Summarize,
}

impl ConversationStep {
    /// Returns true if free-text answers may be submitted.
    pub fn accepts_responses(&self) -> bool {
        matches!(self, Self::Converse)
    }

    /// Returns true for the step where sentiment and persistence happen.
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summarize)
    }
}

impl StateMachine for ConversationStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStep::*;
        matches!(
            (self, target),
            (CollectIdentity, Converse) | (Converse, Summarize) | (Summarize, CollectIdentity)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStep::*;
        match self {
            CollectIdentity => vec![Converse],
            Converse => vec![Summarize],
            Summarize => vec![CollectIdentity],
        }
    }
}
