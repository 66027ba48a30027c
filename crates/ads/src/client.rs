//! Ad-serving capability.
//!
//! The concrete implementation lives in the platform shell (native AdMob
//! plugin); this core only sequences the calls. Every operation can fail (the
//! network may be unreachable, the SDK may reject a request) and the
//! manager treats all of those as non-fatal.

use async_trait::async_trait;

/// Errors surfaced by the ad-serving capability.
#[derive(Debug, thiserror::Error)]
pub enum AdClientError {
    /// The ad network could not be reached.
    #[error("ad network unreachable: {0}")]
    Network(String),

    /// The SDK rejected the operation (bad unit id, no fill, not ready).
    #[error("ad request rejected: {0}")]
    Rejected(String),
}

/// Banner sizes supported by the underlying SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSize {
    Banner,
    LargeBanner,
    AdaptiveBanner,
}

/// Where the banner is anchored on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPosition {
    TopCenter,
    Center,
    BottomCenter,
}

/// Parameters for a banner show call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerOptions {
    pub ad_unit_id: String,
    pub size: BannerSize,
    pub position: BannerPosition,
    /// Inset from the anchored edge, in device points. Platform-specific:
    /// iOS safe areas already push the view inward.
    pub margin: u32,
    pub is_testing: bool,
}

/// Parameters for preparing a full-screen (interstitial/reward) unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdOptions {
    pub ad_unit_id: String,
    pub is_testing: bool,
}

/// External ad-serving capability (native SDK plugin).
#[async_trait]
pub trait AdServingClient: Send + Sync {
    async fn initialize(
        &self,
        testing_devices: &[String],
        initialize_for_testing: bool,
    ) -> Result<(), AdClientError>;

    async fn show_banner(&self, options: &BannerOptions) -> Result<(), AdClientError>;
    async fn hide_banner(&self) -> Result<(), AdClientError>;
    /// Stronger teardown than hide: releases the underlying native view.
    async fn remove_banner(&self) -> Result<(), AdClientError>;

    async fn prepare_interstitial(&self, options: &AdOptions) -> Result<(), AdClientError>;
    async fn show_interstitial(&self) -> Result<(), AdClientError>;

    async fn prepare_reward(&self, options: &AdOptions) -> Result<(), AdClientError>;
    async fn show_reward(&self) -> Result<(), AdClientError>;
}
