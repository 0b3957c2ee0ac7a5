//! SessionController - drives one questionnaire session from user events.
//!
//! Each event applies at most one mutation to the `ConversationSession`,
//! followed by a single guard pass. Entering Summarize computes the
//! sentiment and attempts the save exactly once; the result is cached so
//! rendering the summary again has no side effects.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::PersistenceGateway;
use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::{
    ConversationSession, ConversationStep, Message, SentimentClassifier, SentimentLabel,
    SentimentScore, MAX_MESSAGES,
};

const NAME_PROMPT: &str = "What is your name?";
const DATE_OF_BIRTH_PROMPT: &str = "What is your date of birth?";
const SAVED_MESSAGE: &str = "Chat saved to database";
const NOT_SAVED_MESSAGE: &str = "Could not save to database";

/// Discrete input from the interactive surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// "Start Chat" with the identity form contents.
    StartChat {
        name: String,
        date_of_birth: Option<NaiveDate>,
    },
    /// "Send" with a free-text answer.
    SendResponse { text: String },
    /// "End Chat Now".
    EndChat,
    /// "Start New Chat".
    StartNew,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::StartChat { .. } => "start_chat",
            SessionEvent::SendResponse { .. } => "send_response",
            SessionEvent::EndChat => "end_chat",
            SessionEvent::StartNew => "start_new",
        }
    }
}

/// Whether an event changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Applied,
    /// A guard refused the event; the session is unchanged.
    Ignored,
}

impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EventOutcome::Applied)
    }
}

/// Result of the terminal step, computed once per Summarize entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryOutcome {
    pub sentiment: SentimentLabel,
    pub score: SentimentScore,
    pub saved: bool,
}

impl SummaryOutcome {
    pub fn save_message(&self) -> &'static str {
        if self.saved {
            SAVED_MESSAGE
        } else {
            NOT_SAVED_MESSAGE
        }
    }
}

/// `messages_so_far / max_messages`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub messages_so_far: usize,
    pub max_messages: usize,
}

/// Everything the presentation layer needs to render a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub step: ConversationStep,
    pub title: Option<String>,
    pub prompts: Vec<String>,
    pub transcript: Vec<Message>,
    pub progress: Progress,
    pub accepts_response: bool,
    pub summary: Option<SummaryOutcome>,
}

/// Owns one session and the gateway used when it finishes.
pub struct SessionController {
    id: SessionId,
    session: ConversationSession,
    summary: Option<SummaryOutcome>,
    gateway: Arc<PersistenceGateway>,
}

impl SessionController {
    pub fn new(id: SessionId, gateway: Arc<PersistenceGateway>) -> Self {
        Self {
            id,
            session: ConversationSession::new(),
            summary: None,
            gateway,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn summary(&self) -> Option<&SummaryOutcome> {
        self.summary.as_ref()
    }

    /// Applies one event, then re-evaluates the transition guards once.
    pub async fn handle(&mut self, event: SessionEvent) -> EventOutcome {
        let event_name = event.name();
        let result = match event {
            SessionEvent::StartChat {
                name,
                date_of_birth,
            } => self.session.begin(&name, date_of_birth),
            SessionEvent::SendResponse { text } => self.session.answer(&text),
            SessionEvent::EndChat => self.session.finish(),
            SessionEvent::StartNew => self.session.reset().map(|()| {
                self.summary = None;
            }),
        };

        if let Err(reason) = result {
            tracing::debug!(
                session_id = %self.id,
                event = event_name,
                %reason,
                "Event ignored"
            );
            return EventOutcome::Ignored;
        }

        tracing::debug!(
            session_id = %self.id,
            event = event_name,
            step = ?self.session.step(),
            messages = self.session.message_count(),
            "Event applied"
        );
        self.evaluate_guards().await;
        EventOutcome::Applied
    }

    async fn evaluate_guards(&mut self) {
        if self.session.needs_summary() {
            if let Err(reason) = self.session.finish() {
                tracing::error!(session_id = %self.id, %reason, "Could not enter summary");
                return;
            }
        }
        if self.session.step().is_summary() && self.summary.is_none() {
            self.summarize().await;
        }
    }

    async fn summarize(&mut self) {
        let transcript = self.session.transcript();
        let score = SentimentClassifier::score(transcript);
        let sentiment = score.label();
        tracing::debug!(
            session_id = %self.id,
            positive = score.positive,
            negative = score.negative,
            %sentiment,
            "Sentiment computed"
        );

        let saved = match self.session.identity() {
            Some(identity) => self.gateway.save(identity, transcript, sentiment).await,
            None => false,
        };

        self.summary = Some(SummaryOutcome {
            sentiment,
            score,
            saved,
        });
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> SessionView {
        let step = self.session.step();
        let prompts = match step {
            ConversationStep::CollectIdentity => {
                vec![NAME_PROMPT.to_string(), DATE_OF_BIRTH_PROMPT.to_string()]
            }
            ConversationStep::Converse if self.session.accepts_response() => self
                .session
                .current_question()
                .map(|q| vec![q.to_string()])
                .unwrap_or_default(),
            ConversationStep::Converse | ConversationStep::Summarize => Vec::new(),
        };

        SessionView {
            session_id: self.id,
            step,
            title: self
                .session
                .identity()
                .map(|identity| format!("Chat with {}", identity.name())),
            prompts,
            transcript: self.session.transcript().to_vec(),
            progress: Progress {
                messages_so_far: self.session.message_count(),
                max_messages: MAX_MESSAGES,
            },
            accepts_response: self.session.accepts_response(),
            summary: self.summary,
        }
    }
}
