//! Tracking-permission gateway.
//!
//! Thin adapter over the platform tracking-permission capability (iOS App
//! Tracking Transparency). Off iOS there is no such concept and everything
//! reports [`TrackingAuthorization::Authorized`] without touching the
//! provider. The last value the platform reported is cached in memory and
//! under a dedicated key-value entry so a later failed read still has
//! something to fall back on.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use agekit_core::gating;
use agekit_core::{Platform, TrackingAuthorization};
use agekit_store::KeyValueStore;

/// Key-value entry caching the last platform-reported status.
const TRACKING_STATUS_KEY: &str = "tracking.status";

/// Errors from the platform tracking-permission capability.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("tracking API unavailable: {0}")]
    Unavailable(String),
}

/// External tracking-permission capability (iOS ATT plugin).
#[async_trait]
pub trait TrackingPermissions: Send + Sync {
    /// Prompt the user for tracking authorization.
    async fn request_permission(&self) -> Result<TrackingAuthorization, TrackingError>;

    /// Read the current authorization without prompting.
    async fn status(&self) -> Result<TrackingAuthorization, TrackingError>;
}

/// Reads, requests and caches tracking authorization.
pub struct TrackingGateway {
    platform: Platform,
    provider: Arc<dyn TrackingPermissions>,
    kv: Arc<dyn KeyValueStore>,
    last_seen: RwLock<Option<TrackingAuthorization>>,
}

impl TrackingGateway {
    pub fn new(
        platform: Platform,
        provider: Arc<dyn TrackingPermissions>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            platform,
            provider,
            kv,
            last_seen: RwLock::new(None),
        }
    }

    /// Prompt for tracking authorization.
    ///
    /// A provider failure maps to `Denied`: when in doubt, no tracking.
    pub async fn request(&self) -> TrackingAuthorization {
        if !self.platform.has_tracking_permission() {
            return TrackingAuthorization::Authorized;
        }

        match self.provider.request_permission().await {
            Ok(status) => {
                tracing::info!(?status, "Tracking permission decided");
                self.remember(status).await;
                status
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tracking permission request failed, assuming denied");
                TrackingAuthorization::Denied
            }
        }
    }

    /// Current authorization, falling back to the cached value when the
    /// platform read fails.
    pub async fn status(&self) -> TrackingAuthorization {
        if !self.platform.has_tracking_permission() {
            return TrackingAuthorization::Authorized;
        }

        match self.provider.status().await {
            Ok(status) => {
                self.remember(status).await;
                status
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tracking status read failed, using cached value");
                self.cached().await
            }
        }
    }

    /// The tracking leg of the gating policy for this platform.
    pub async fn is_authorized(&self) -> bool {
        gating::tracking_satisfied(self.platform, self.status().await)
    }

    async fn remember(&self, status: TrackingAuthorization) {
        *self.last_seen.write().await = Some(status);
        match serde_json::to_string(&status) {
            Ok(json) => {
                if let Err(e) = self.kv.set(TRACKING_STATUS_KEY, &json).await {
                    tracing::debug!(error = %e, "Failed to cache tracking status");
                }
            }
            Err(e) => tracing::debug!(error = %e, "Failed to encode tracking status"),
        }
    }

    async fn cached(&self) -> TrackingAuthorization {
        if let Some(status) = *self.last_seen.read().await {
            return status;
        }
        match self.kv.get(TRACKING_STATUS_KEY).await {
            Ok(Some(raw)) => {
                serde_json::from_str(&raw).unwrap_or(TrackingAuthorization::NotDetermined)
            }
            _ => TrackingAuthorization::NotDetermined,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
