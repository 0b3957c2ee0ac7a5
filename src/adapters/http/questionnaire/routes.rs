//! HTTP routes for questionnaire endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, end_chat, get_session, health, send_response, start_chat,
    start_new, QuestionnaireAppState,
};

/// Session endpoints, meant to be nested under `/api/sessions`.
pub fn session_routes() -> Router<QuestionnaireAppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/start", post(start_chat))
        .route("/:id/responses", post(send_response))
        .route("/:id/end", post(end_chat))
        .route("/:id/restart", post(start_new))
}

/// Full questionnaire API including the health probe.
pub fn questionnaire_router(state: QuestionnaireAppState) -> Router {
    Router::new()
        .nest("/api/sessions", session_routes())
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryChatRecordStore;
    use crate::application::handlers::questionnaire::{PersistenceGateway, SessionRegistry};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn router() -> Router {
        let gateway = PersistenceGateway::new(
            Arc::new(InMemoryChatRecordStore::new()),
            Duration::from_secs(1),
        );
        let registry = SessionRegistry::new(Arc::new(gateway));
        questionnaire_router(QuestionnaireAppState::new(registry))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_returns_created() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let uri = format!(
            "/api/sessions/{}",
            crate::domain::foundation::SessionId::new()
        );
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
