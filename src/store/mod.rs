//! Durable client-side storage (the session lives here between runs)

mod kv;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
