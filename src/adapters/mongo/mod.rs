//! MongoDB adapters.

mod chat_record_store;

pub use chat_record_store::MongoChatRecordStore;
