//! Application layer - Controllers and services.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::questionnaire::{
    EventOutcome, PersistenceGateway, SessionController, SessionEvent, SessionRegistry,
    SessionView, SummaryOutcome,
};
