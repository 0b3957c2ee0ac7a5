//! HTTP DTOs for questionnaire endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::questionnaire::{Progress, SessionView, SummaryOutcome};
use crate::domain::questionnaire::{ConversationStep, Message, Role};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Identity form submitted with "Start Chat".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartChatRequest {
    #[serde(default)]
    pub name: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

impl StartChatRequest {
    /// Parsed date of birth; anything unparseable counts as absent.
    pub fn parsed_date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

/// Free-text answer submitted with "Send".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponseRequest {
    #[serde(default)]
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One transcript line.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: Role,
    pub speaker: &'static str,
    pub text: String,
    pub timestamp: String,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            speaker: match message.role() {
                Role::User => "You",
                Role::Assistant => "Bot",
            },
            text: message.text().to_string(),
            timestamp: message.timestamp().to_rfc3339(),
        }
    }
}

/// Progress counter, e.g. `3/10`.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub messages_so_far: usize,
    pub max_messages: usize,
    pub label: String,
}

impl From<Progress> for ProgressResponse {
    fn from(progress: Progress) -> Self {
        Self {
            messages_so_far: progress.messages_so_far,
            max_messages: progress.max_messages,
            label: format!("{}/{}", progress.messages_so_far, progress.max_messages),
        }
    }
}

/// Final assessment shown at the Summarize step.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub sentiment: String,
    pub closing_message: String,
    pub saved: bool,
    pub save_message: String,
}

impl From<SummaryOutcome> for SummaryResponse {
    fn from(summary: SummaryOutcome) -> Self {
        Self {
            sentiment: summary.sentiment.to_string(),
            closing_message: summary.sentiment.closing_message().to_string(),
            saved: summary.saved,
            save_message: summary.save_message().to_string(),
        }
    }
}

/// Full render state of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub step: ConversationStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub prompts: Vec<String>,
    pub transcript: Vec<MessageResponse>,
    pub progress: ProgressResponse,
    pub accepts_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResponse>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            step: view.step,
            title: view.title,
            prompts: view.prompts,
            transcript: view.transcript.iter().map(MessageResponse::from).collect(),
            progress: view.progress.into(),
            accepts_response: view.accepts_response,
            summary: view.summary.map(Into::into),
        }
    }
}

/// Response to session creation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
    pub view: SessionResponse,
}

/// Response to any event endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    /// False when the input failed a guard and nothing changed.
    pub accepted: bool,
    pub view: SessionResponse,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }
}
