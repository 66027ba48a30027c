//! Persistence layer for the agekit ad/consent stack.
//!
//! The platform shell owns the durable key-value store (device preferences
//! in the mobile builds); this crate defines the [`KeyValueStore`]
//! capability trait the shell implements, an in-memory implementation for
//! tests and development, and [`ConsentStore`], the typed adapter that
//! reads and writes the consent record atomically.

pub mod consent_store;
pub mod kv;

pub use consent_store::ConsentStore;
pub use kv::{KeyValueStore, MemoryStore, StoreError};
