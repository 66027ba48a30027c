//! Consent event infrastructure.
//!
//! Cross-component notification goes through an explicit publish/subscribe
//! channel instead of global listeners:
//!
//! - [`ConsentEvent`] — the domain events the consent machine emits.
//! - [`EventBus`] — in-process fan-out hub backed by
//!   `tokio::sync::broadcast`, shared via `Arc<EventBus>`.

pub mod bus;

pub use bus::{ConsentEvent, EventBus};
