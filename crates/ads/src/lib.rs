//! Advertising lifecycle orchestration.
//!
//! The ad network and the platform tracking-permission API are external
//! capabilities behind traits ([`AdServingClient`], [`TrackingPermissions`]);
//! this crate owns everything around them:
//!
//! - [`AdManager`] — the per-unit lifecycle controller (banner show/hide/
//!   remove, interstitial and reward prepare/show with single-use
//!   semantics and in-flight guards).
//! - [`TrackingGateway`] — adapter caching the last-seen tracking
//!   authorization, defaulting to authorized off iOS.
//! - [`AdsConfig`] — ad unit ids and testing knobs from the environment.
//! - [`run_consent_listener`] — background task that tears down live ad
//!   state when consent is revoked.

pub mod client;
pub mod config;
pub mod manager;
pub mod tracking;

pub use client::{AdClientError, AdOptions, AdServingClient, BannerOptions, BannerPosition, BannerSize};
pub use config::{AdUnitIds, AdsConfig};
pub use manager::{run_consent_listener, AdManager};
pub use tracking::{TrackingError, TrackingGateway, TrackingPermissions};
