//! HTTP adapters - REST API implementations.

pub mod questionnaire;

// Re-export key types for convenience
pub use questionnaire::questionnaire_router;
pub use questionnaire::QuestionnaireAppState;
