//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes exposing the questionnaire
//! - `mongo` - MongoDB chat record store
//! - `memory` - In-memory chat record store

pub mod http;
pub mod memory;
pub mod mongo;

pub use memory::InMemoryChatRecordStore;
pub use mongo::MongoChatRecordStore;
