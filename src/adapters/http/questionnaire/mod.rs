//! HTTP adapter for questionnaire endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, EventResponse, HealthResponse, MessageResponse, ProgressResponse,
    SendResponseRequest, SessionCreatedResponse, SessionResponse, StartChatRequest,
    SummaryResponse,
};
pub use handlers::QuestionnaireAppState;
pub use routes::{questionnaire_router, session_routes};
