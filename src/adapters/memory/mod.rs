//! In-memory adapters for tests and local runs.

mod chat_record_store;

pub use chat_record_store::InMemoryChatRecordStore;
