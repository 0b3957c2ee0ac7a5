//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, state machine, errors)
//! - `questionnaire` - Session aggregate, question bank, sentiment heuristic, chat record

pub mod foundation;
pub mod questionnaire;
