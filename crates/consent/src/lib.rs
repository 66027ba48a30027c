//! Consent state machine.
//!
//! [`ConsentManager`] derives the exposed [`ConsentInfo`] snapshot from the
//! persisted record and the consent-form capability, and owns the
//! `grant` / `deny` / `grant_non_personalized` / `reset` mutations that both
//! persist and broadcast the new state.
//!
//! [`ConsentInfo`]: agekit_core::ConsentInfo

pub mod form;
pub mod manager;

pub use form::{ConsentFormLoader, FormLoadError, NoopFormLoader};
pub use manager::ConsentManager;
