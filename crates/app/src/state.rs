//! Composition root.
//!
//! Every service is constructed exactly once here and shared by reference;
//! there is no global mutable state. The embedding shell passes in the
//! platform capabilities and keeps the returned [`AppState`] for the
//! lifetime of the process.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use agekit_ads::{run_consent_listener, AdManager, AdServingClient, TrackingGateway, TrackingPermissions};
use agekit_consent::{ConsentFormLoader, ConsentManager};
use agekit_events::EventBus;
use agekit_store::{ConsentStore, KeyValueStore};

use crate::config::AppConfig;
use crate::provider::AdProvider;

/// How long shutdown waits for the consent listener to exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Platform capabilities supplied by the embedding shell.
pub struct PlatformCapabilities {
    /// Durable key-value storage (device preferences).
    pub kv: Arc<dyn KeyValueStore>,
    /// Native ad SDK plugin.
    pub ad_client: Arc<dyn AdServingClient>,
    /// Tracking-permission API (meaningful on iOS only).
    pub tracking: Arc<dyn TrackingPermissions>,
    /// Consent-collection form resources.
    pub consent_form: Arc<dyn ConsentFormLoader>,
}

/// Shared application state, constructed once at startup.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bus: Arc<EventBus>,
    pub consent: Arc<ConsentManager>,
    pub tracking: Arc<TrackingGateway>,
    pub ads: Arc<AdManager>,
    pub provider: AdProvider,
    listener_cancel: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    /// Wire the services together and spawn the consent listener.
    pub fn bootstrap(config: AppConfig, capabilities: PlatformCapabilities) -> Self {
        let config = Arc::new(config);
        let bus = Arc::new(EventBus::default());

        let consent_store = ConsentStore::new(Arc::clone(&capabilities.kv));
        let consent = Arc::new(
            ConsentManager::new(consent_store, capabilities.consent_form, Arc::clone(&bus))
                .with_consent_required(config.consent_required),
        );

        let tracking = Arc::new(TrackingGateway::new(
            config.platform,
            capabilities.tracking,
            Arc::clone(&capabilities.kv),
        ));

        let ads = Arc::new(AdManager::new(
            capabilities.ad_client,
            config.ads.clone(),
            config.platform,
        ));

        let listener_cancel = CancellationToken::new();
        let listener = tokio::spawn(run_consent_listener(
            Arc::clone(&ads),
            bus.subscribe(),
            listener_cancel.clone(),
        ));

        let provider = AdProvider::new(
            config.platform,
            config.disable_ads,
            Arc::clone(&consent),
            Arc::clone(&tracking),
            Arc::clone(&ads),
        );

        tracing::info!(
            platform = ?config.platform,
            disable_ads = config.disable_ads,
            consent_required = config.consent_required,
            "Application state composed"
        );

        Self {
            config,
            bus,
            consent,
            tracking,
            ads,
            provider,
            listener_cancel,
            listener: Mutex::new(Some(listener)),
        }
    }

    /// Run the startup sequence: resolve consent, request tracking
    /// permission where the platform has the concept, and warm the ad
    /// stack when ads are already allowed.
    pub async fn initialize(&self) {
        self.consent.initialize().await;

        if self.config.platform.has_tracking_permission() {
            self.tracking.request().await;
        }

        if self.provider.should_show_ads().await {
            self.ads.initialize().await;
        }
    }

    /// Stop the consent listener. Idempotent.
    pub async fn shutdown(&self) {
        self.listener_cancel.cancel();
        if let Some(handle) = self.listener.lock().await.take() {
            if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
                tracing::warn!("Consent listener did not stop in time");
            }
        }
        tracing::info!("Application state shut down");
    }
}
