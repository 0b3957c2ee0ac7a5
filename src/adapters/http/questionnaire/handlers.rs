//! HTTP handlers for questionnaire endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::questionnaire::{
    SessionEvent, SessionRegistry, SharedController,
};
use crate::domain::foundation::SessionId;

use super::dto::{
    ErrorResponse, EventResponse, HealthResponse, SendResponseRequest, SessionCreatedResponse,
    SessionResponse, StartChatRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application state for questionnaire routes.
#[derive(Clone)]
pub struct QuestionnaireAppState {
    pub registry: SessionRegistry,
}

impl QuestionnaireAppState {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Open a fresh conversation
pub async fn create_session(State(state): State<QuestionnaireAppState>) -> Response {
    let (id, controller) = state.registry.create().await;
    let response = SessionCreatedResponse {
        session_id: id.to_string(),
        view: controller.lock().await.view().into(),
    };
    (StatusCode::CREATED, Json(response)).into_response()
}

/// GET /api/sessions/:id - Current render state
pub async fn get_session(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let controller = match lookup(&state, &session_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    let response: SessionResponse = controller.lock().await.view().into();
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/sessions/:id/start - Submit identity and start the chat
pub async fn start_chat(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<StartChatRequest>,
) -> Response {
    let date_of_birth = req.parsed_date_of_birth();
    let event = SessionEvent::StartChat {
        name: req.name,
        date_of_birth,
    };
    dispatch(&state, &session_id, event).await
}

/// POST /api/sessions/:id/responses - Answer the current question
pub async fn send_response(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SendResponseRequest>,
) -> Response {
    dispatch(&state, &session_id, SessionEvent::SendResponse { text: req.text }).await
}

/// POST /api/sessions/:id/end - Skip remaining questions
pub async fn end_chat(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
) -> Response {
    dispatch(&state, &session_id, SessionEvent::EndChat).await
}

/// POST /api/sessions/:id/restart - Begin a new conversation in the same session
pub async fn start_new(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
) -> Response {
    dispatch(&state, &session_id, SessionEvent::StartNew).await
}

/// DELETE /api/sessions/:id - Discard a session
pub async fn delete_session(
    State(state): State<QuestionnaireAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if state.registry.remove(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&session_id)
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

async fn dispatch(
    state: &QuestionnaireAppState,
    session_id: &str,
    event: SessionEvent,
) -> Response {
    let controller = match lookup(state, session_id).await {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    let mut controller = controller.lock().await;
    let outcome = controller.handle(event).await;
    let response = EventResponse {
        accepted: outcome.is_applied(),
        view: controller.view().into(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn lookup(
    state: &QuestionnaireAppState,
    session_id: &str,
) -> Result<SharedController, Response> {
    let id = parse_session_id(session_id)?;
    state
        .registry
        .get(&id)
        .await
        .ok_or_else(|| not_found(session_id))
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn not_found(session_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Session", session_id)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_maps_to_400() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn well_formed_id_parses() {
        let id = SessionId::new();
        assert_eq!(parse_session_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn missing_session_maps_to_404() {
        assert_eq!(not_found("abc").status(), StatusCode::NOT_FOUND);
    }
}
