//! The ad/consent surface handed to the UI layer.
//!
//! Every show operation consults the gating policy first; hide and remove
//! always pass through so a revoked-consent teardown can complete. Nothing
//! here returns an error: an ad-network failure must never crash or block
//! a UI action, it only results in the absence of ads.

use std::sync::Arc;

use agekit_ads::{AdManager, TrackingGateway};
use agekit_consent::ConsentManager;
use agekit_core::{gating, ConsentInfo, Platform};

/// UI-facing facade over the consent machine and the ad lifecycle.
///
/// Cheaply cloneable; inner services are shared.
#[derive(Clone)]
pub struct AdProvider {
    platform: Platform,
    ads_disabled: bool,
    consent: Arc<ConsentManager>,
    tracking: Arc<TrackingGateway>,
    ads: Arc<AdManager>,
}

impl AdProvider {
    pub fn new(
        platform: Platform,
        ads_disabled: bool,
        consent: Arc<ConsentManager>,
        tracking: Arc<TrackingGateway>,
        ads: Arc<AdManager>,
    ) -> Self {
        Self {
            platform,
            ads_disabled,
            consent,
            tracking,
            ads,
        }
    }

    /// Whether an ad may be requested and displayed right now.
    pub async fn should_show_ads(&self) -> bool {
        gating::should_show_ads(
            self.platform.is_mobile(),
            self.ads_disabled,
            self.consent.can_request_ads().await,
            self.tracking.is_authorized().await,
        )
    }

    // -- ad operations ------------------------------------------------------

    pub async fn show_banner(&self) {
        if !self.should_show_ads().await {
            tracing::debug!("Ad gating denied banner show");
            return;
        }
        self.ads.show_banner().await;
    }

    /// Teardown is never gated.
    pub async fn hide_banner(&self) {
        self.ads.hide_banner().await;
    }

    /// Teardown is never gated.
    pub async fn remove_banner(&self) {
        self.ads.remove_banner().await;
    }

    pub async fn show_interstitial(&self) {
        if !self.should_show_ads().await {
            tracing::debug!("Ad gating denied interstitial show");
            return;
        }
        self.ads.show_interstitial().await;
    }

    pub async fn show_reward(&self) {
        if !self.should_show_ads().await {
            tracing::debug!("Ad gating denied reward show");
            return;
        }
        self.ads.show_reward().await;
    }

    // -- consent passthroughs -----------------------------------------------

    pub async fn consent_info(&self) -> ConsentInfo {
        self.consent.consent_info().await
    }

    pub async fn grant_consent(&self) {
        self.consent.grant().await;
    }

    pub async fn grant_non_personalized_consent(&self) {
        self.consent.grant_non_personalized().await;
    }

    pub async fn deny_consent(&self) {
        self.consent.deny().await;
    }

    pub async fn reset_consent(&self) {
        self.consent.reset().await;
    }

    pub fn show_privacy_options(&self) {
        self.consent.show_privacy_options();
    }
}
