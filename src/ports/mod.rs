//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ChatRecordStore` - Document store for finished conversations

mod chat_record_store;

pub use chat_record_store::{ChatRecordStore, PersistenceError};
