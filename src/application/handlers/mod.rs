//! Application handlers.
//!
//! Orchestrate domain operations and the ports they need.

pub mod questionnaire;
