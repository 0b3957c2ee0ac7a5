//! Questionnaire command handling.

mod persistence_gateway;
mod session_controller;
mod session_registry;

pub use persistence_gateway::PersistenceGateway;
pub use session_controller::{
    EventOutcome, Progress, SessionController, SessionEvent, SessionView, SummaryOutcome,
};
pub use session_registry::{SessionRegistry, SharedController};
