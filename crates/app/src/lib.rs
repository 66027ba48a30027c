//! Application composition for the agekit ad/consent stack.
//!
//! The embedding shell (the mobile/web application) supplies the platform
//! capabilities (key-value storage, the native ad SDK, the tracking
//! permission API, the consent form loader) and this crate wires them
//! into the running system:
//!
//! - [`AppConfig`] — environment-driven configuration.
//! - [`AppState::bootstrap`] — the composition root; constructs every
//!   service once and spawns the consent listener.
//! - [`AdProvider`] — the surface handed to the UI layer; applies the
//!   gating policy and never lets an ad failure escape to the caller.

pub mod config;
pub mod provider;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use provider::AdProvider;
pub use state::{AppState, PlatformCapabilities};
pub use telemetry::init_tracing;
