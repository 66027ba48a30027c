//! Shared domain types and pure logic for the agekit ad/consent stack.
//!
//! This crate has no internal dependencies and no I/O. It carries:
//!
//! - [`types`] — platform, tracking-authorization and ad-unit enums.
//! - [`consent`] — the persisted consent data model, the derived
//!   [`ConsentInfo`](consent::ConsentInfo) snapshot and the expiry rules.
//! - [`gating`] — the pure "may ads display now" decision.

pub mod consent;
pub mod gating;
pub mod types;

pub use consent::{ConsentChoice, ConsentInfo, ConsentRecord, ConsentState, FormStatus};
pub use types::{AdUnitKind, Platform, TrackingAuthorization};
