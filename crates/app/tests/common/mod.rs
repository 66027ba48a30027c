//! Shared mock capabilities and harness for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use agekit_ads::{
    AdClientError, AdOptions, AdServingClient, AdsConfig, BannerOptions, TrackingError,
    TrackingPermissions,
};
use agekit_app::{AppConfig, AppState, PlatformCapabilities};
use agekit_consent::NoopFormLoader;
use agekit_core::{Platform, TrackingAuthorization};
use agekit_store::{KeyValueStore, MemoryStore};

/// Recording fake for the native ad SDK. Every call succeeds.
#[derive(Default)]
pub struct RecordingAdClient {
    pub initialize_calls: AtomicUsize,
    pub banner_show_calls: AtomicUsize,
    pub banner_hide_calls: AtomicUsize,
    pub banner_remove_calls: AtomicUsize,
    pub interstitial_prepare_calls: AtomicUsize,
    pub interstitial_show_calls: AtomicUsize,
    pub reward_prepare_calls: AtomicUsize,
    pub reward_show_calls: AtomicUsize,
    pub last_banner_options: Mutex<Option<BannerOptions>>,
}

#[async_trait]
impl AdServingClient for RecordingAdClient {
    async fn initialize(
        &self,
        _testing_devices: &[String],
        _initialize_for_testing: bool,
    ) -> Result<(), AdClientError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn show_banner(&self, options: &BannerOptions) -> Result<(), AdClientError> {
        self.banner_show_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_banner_options.lock().unwrap() = Some(options.clone());
        Ok(())
    }

    async fn hide_banner(&self) -> Result<(), AdClientError> {
        self.banner_hide_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_banner(&self) -> Result<(), AdClientError> {
        self.banner_remove_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn prepare_interstitial(&self, _options: &AdOptions) -> Result<(), AdClientError> {
        self.interstitial_prepare_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn show_interstitial(&self) -> Result<(), AdClientError> {
        self.interstitial_show_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn prepare_reward(&self, _options: &AdOptions) -> Result<(), AdClientError> {
        self.reward_prepare_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn show_reward(&self) -> Result<(), AdClientError> {
        self.reward_show_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Tracking provider that always reports the same status.
pub struct StaticTracking(pub TrackingAuthorization);

#[async_trait]
impl TrackingPermissions for StaticTracking {
    async fn request_permission(&self) -> Result<TrackingAuthorization, TrackingError> {
        Ok(self.0)
    }

    async fn status(&self) -> Result<TrackingAuthorization, TrackingError> {
        Ok(self.0)
    }
}

/// Build a test `AppConfig` for the given platform with safe defaults:
/// ads enabled, consent required, sample ad unit ids.
pub fn test_config(platform: Platform) -> AppConfig {
    AppConfig {
        platform,
        disable_ads: false,
        consent_required: true,
        ads: AdsConfig::from_env(),
    }
}

/// A bootstrapped application over mock capabilities.
pub struct Harness {
    pub state: AppState,
    pub client: Arc<RecordingAdClient>,
    pub kv: Arc<MemoryStore>,
}

/// Bootstrap with tracking authorized (the common case off iOS).
pub fn harness(config: AppConfig) -> Harness {
    harness_with_tracking(config, TrackingAuthorization::Authorized)
}

/// Bootstrap with a scripted tracking status.
pub fn harness_with_tracking(config: AppConfig, tracking: TrackingAuthorization) -> Harness {
    agekit_app::init_tracing();

    let kv = Arc::new(MemoryStore::new());
    let client = Arc::new(RecordingAdClient::default());

    let capabilities = PlatformCapabilities {
        kv: Arc::clone(&kv) as Arc<dyn KeyValueStore>,
        ad_client: Arc::clone(&client) as Arc<dyn AdServingClient>,
        tracking: Arc::new(StaticTracking(tracking)),
        consent_form: Arc::new(NoopFormLoader),
    };

    Harness {
        state: AppState::bootstrap(config, capabilities),
        client,
        kv,
    }
}

/// Poll until `condition` holds or a one-second deadline passes.
pub async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition should hold within the deadline");
}
