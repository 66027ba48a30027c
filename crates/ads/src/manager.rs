//! Ad unit lifecycle controller.
//!
//! [`AdManager`] owns the readiness state of the three ad surfaces and
//! sequences the initialize → prepare → show → reuse lifecycle against the
//! external [`AdServingClient`]. Contracts:
//!
//! - At most one banner show is ever in flight; a second call while one is
//!   outstanding observes the in-flight latch and returns without effect.
//! - Interstitial and reward units are single-use: readiness drops the
//!   moment a show succeeds and a re-prepare is scheduled after a short
//!   delay instead of hammering the network synchronously.
//! - Hide and remove always attempt the underlying call, so a teardown can
//!   complete even when the cached state has drifted.
//! - Nothing here propagates an error to the caller; failures are logged
//!   and leave the unit unready/invisible.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;

use agekit_core::{AdUnitKind, Platform};
use agekit_events::ConsentEvent;

use crate::client::{AdServingClient, AdOptions, BannerOptions, BannerPosition, BannerSize};
use crate::config::AdsConfig;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Banner inset from the bottom edge. iOS safe areas already push the view
/// clear of system chrome, so it needs less.
const BANNER_MARGIN_IOS: u32 = 8;

/// Banner inset from the bottom edge on Android.
const BANNER_MARGIN_ANDROID: u32 = 16;

// ---------------------------------------------------------------------------
// Unit state
// ---------------------------------------------------------------------------

/// Readiness flags for all units. Owned exclusively by the manager;
/// externally readable only through the accessor methods.
#[derive(Default)]
struct UnitStates {
    initialized: AtomicBool,
    banner_visible: AtomicBool,
    interstitial_ready: AtomicBool,
    reward_ready: AtomicBool,
}

// ---------------------------------------------------------------------------
// AdManager
// ---------------------------------------------------------------------------

/// Sequences ad unit lifecycles against the external ad-serving capability.
///
/// Constructed once at application start and shared via `Arc`.
pub struct AdManager {
    client: Arc<dyn AdServingClient>,
    config: AdsConfig,
    platform: Platform,
    states: Arc<UnitStates>,
    /// Serializes SDK initialization.
    init_lock: Mutex<()>,
    /// Per-unit show-in-flight latches, acquired with `try_lock` so a
    /// concurrent second show returns instead of queueing.
    banner_show: Mutex<()>,
    interstitial_show: Mutex<()>,
    reward_show: Mutex<()>,
}

impl AdManager {
    pub fn new(client: Arc<dyn AdServingClient>, config: AdsConfig, platform: Platform) -> Self {
        Self {
            client,
            config,
            platform,
            states: Arc::new(UnitStates::default()),
            init_lock: Mutex::new(()),
            banner_show: Mutex::new(()),
            interstitial_show: Mutex::new(()),
            reward_show: Mutex::new(()),
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Initialize the ad SDK and pre-warm the full-screen units.
    ///
    /// Safe to call repeatedly; only the first successful call reaches the
    /// SDK.
    pub async fn initialize(&self) {
        if self.ensure_initialized().await {
            self.spawn_prepare(AdUnitKind::Interstitial);
            self.spawn_prepare(AdUnitKind::Reward);
        }
    }

    async fn ensure_initialized(&self) -> bool {
        if self.states.initialized.load(Ordering::SeqCst) {
            return true;
        }
        let _guard = self.init_lock.lock().await;
        if self.states.initialized.load(Ordering::SeqCst) {
            return true;
        }

        match self
            .client
            .initialize(
                &self.config.testing_devices,
                self.config.initialize_for_testing,
            )
            .await
        {
            Ok(()) => {
                self.states.initialized.store(true, Ordering::SeqCst);
                tracing::info!("Ad SDK initialized");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Ad SDK initialization failed");
                false
            }
        }
    }

    // -- banner -------------------------------------------------------------

    /// Show the banner.
    ///
    /// No-op when the banner is already visible or another show is in
    /// flight. Initializes the SDK lazily on the first call. On success the
    /// full-screen units are pre-warmed in the background; their failures
    /// never surface here.
    pub async fn show_banner(&self) {
        if self.states.banner_visible.load(Ordering::SeqCst) {
            tracing::debug!("Banner already visible, ignoring show");
            return;
        }
        let Ok(_guard) = self.banner_show.try_lock() else {
            tracing::debug!("Banner show already in flight, ignoring");
            return;
        };

        if !self.ensure_initialized().await {
            return;
        }

        let options = self.banner_options();
        match self.client.show_banner(&options).await {
            Ok(()) => {
                self.states.banner_visible.store(true, Ordering::SeqCst);
                tracing::info!(ad_unit_id = %options.ad_unit_id, "Banner shown");

                self.spawn_prepare(AdUnitKind::Interstitial);
                self.spawn_prepare(AdUnitKind::Reward);
            }
            Err(e) => tracing::error!(error = %e, "Banner show failed"),
        }
        // The latch (_guard) is released on drop in every path.
    }

    /// Hide the banner, keeping the native view around for a cheap re-show.
    ///
    /// Always attempts the underlying call; cached visibility may have
    /// drifted from the native layer.
    pub async fn hide_banner(&self) {
        match self.client.hide_banner().await {
            Ok(()) => {
                self.states.banner_visible.store(false, Ordering::SeqCst);
                tracing::info!("Banner hidden");
            }
            Err(e) => tracing::warn!(error = %e, "Banner hide failed"),
        }
    }

    /// Tear the banner down completely, releasing the native view.
    pub async fn remove_banner(&self) {
        match self.client.remove_banner().await {
            Ok(()) => {
                self.states.banner_visible.store(false, Ordering::SeqCst);
                tracing::info!("Banner removed");
            }
            Err(e) => tracing::warn!(error = %e, "Banner remove failed"),
        }
    }

    // -- full-screen units --------------------------------------------------

    /// Prepare the interstitial unit. No-op before SDK initialization.
    pub async fn prepare_interstitial(&self) {
        if !self.states.initialized.load(Ordering::SeqCst) {
            tracing::debug!("Ad SDK not initialized, skipping interstitial prepare");
            return;
        }
        prepare_unit(
            self.client.as_ref(),
            &self.states,
            AdUnitKind::Interstitial,
            self.ad_options(AdUnitKind::Interstitial),
        )
        .await;
    }

    /// Prepare the reward unit. No-op before SDK initialization.
    pub async fn prepare_reward(&self) {
        if !self.states.initialized.load(Ordering::SeqCst) {
            tracing::debug!("Ad SDK not initialized, skipping reward prepare");
            return;
        }
        prepare_unit(
            self.client.as_ref(),
            &self.states,
            AdUnitKind::Reward,
            self.ad_options(AdUnitKind::Reward),
        )
        .await;
    }

    /// Show the prepared interstitial. No-op unless ready; the SDK errors
    /// on force-showing an unprepared unit.
    pub async fn show_interstitial(&self) {
        if !self.states.interstitial_ready.load(Ordering::SeqCst) {
            tracing::debug!("Interstitial not ready, ignoring show");
            return;
        }
        let Ok(_guard) = self.interstitial_show.try_lock() else {
            tracing::debug!("Interstitial show already in flight, ignoring");
            return;
        };

        match self.client.show_interstitial().await {
            Ok(()) => {
                // Single use: a stale re-show is rejected from here on.
                self.states.interstitial_ready.store(false, Ordering::SeqCst);
                tracing::info!("Interstitial shown");
                self.schedule_reprepare(AdUnitKind::Interstitial);
            }
            Err(e) => tracing::error!(error = %e, "Interstitial show failed"),
        }
    }

    /// Show the prepared reward unit. No-op unless ready.
    pub async fn show_reward(&self) {
        if !self.states.reward_ready.load(Ordering::SeqCst) {
            tracing::debug!("Reward not ready, ignoring show");
            return;
        }
        let Ok(_guard) = self.reward_show.try_lock() else {
            tracing::debug!("Reward show already in flight, ignoring");
            return;
        };

        match self.client.show_reward().await {
            Ok(()) => {
                self.states.reward_ready.store(false, Ordering::SeqCst);
                tracing::info!("Reward shown");
                self.schedule_reprepare(AdUnitKind::Reward);
            }
            Err(e) => tracing::error!(error = %e, "Reward show failed"),
        }
    }

    // -- consent reaction ---------------------------------------------------

    /// React to a consent change.
    ///
    /// Revocation eagerly tears down the banner and drops full-screen
    /// readiness so no stale ad instance survives; a new grant re-warms the
    /// prepares when the SDK is already up.
    pub async fn handle_consent_event(&self, event: ConsentEvent) {
        match event {
            ConsentEvent::Changed { granted: false, .. } => {
                tracing::info!("Consent revoked, tearing down ad state");
                self.remove_banner().await;
                self.states.interstitial_ready.store(false, Ordering::SeqCst);
                self.states.reward_ready.store(false, Ordering::SeqCst);
            }
            ConsentEvent::Changed { granted: true, .. } => {
                if self.states.initialized.load(Ordering::SeqCst) {
                    self.spawn_prepare(AdUnitKind::Interstitial);
                    self.spawn_prepare(AdUnitKind::Reward);
                }
            }
            // Form-display events belong to the UI layer.
            ConsentEvent::ShowForm | ConsentEvent::ShowPrivacyOptions => {}
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.states.initialized.load(Ordering::SeqCst)
    }

    pub fn is_banner_visible(&self) -> bool {
        self.states.banner_visible.load(Ordering::SeqCst)
    }

    pub fn is_interstitial_ready(&self) -> bool {
        self.states.interstitial_ready.load(Ordering::SeqCst)
    }

    pub fn is_reward_ready(&self) -> bool {
        self.states.reward_ready.load(Ordering::SeqCst)
    }

    // -- private helpers ----------------------------------------------------

    fn banner_options(&self) -> BannerOptions {
        let margin = match self.platform {
            Platform::Ios => BANNER_MARGIN_IOS,
            Platform::Android | Platform::Web => BANNER_MARGIN_ANDROID,
        };
        BannerOptions {
            ad_unit_id: self.config.unit_ids(self.platform).banner.clone(),
            size: BannerSize::Banner,
            position: BannerPosition::BottomCenter,
            margin,
            is_testing: self.config.is_testing,
        }
    }

    fn ad_options(&self, kind: AdUnitKind) -> AdOptions {
        let ids = self.config.unit_ids(self.platform);
        let ad_unit_id = match kind {
            AdUnitKind::Banner => ids.banner.clone(),
            AdUnitKind::Interstitial => ids.interstitial.clone(),
            AdUnitKind::Reward => ids.reward.clone(),
        };
        AdOptions {
            ad_unit_id,
            is_testing: self.config.is_testing,
        }
    }

    /// Fire-and-forget prepare; the caller never waits on it.
    fn spawn_prepare(&self, kind: AdUnitKind) {
        let client = Arc::clone(&self.client);
        let states = Arc::clone(&self.states);
        let options = self.ad_options(kind);
        tokio::spawn(async move {
            prepare_unit(client.as_ref(), &states, kind, options).await;
        });
    }

    /// Prepare again after the configured delay.
    fn schedule_reprepare(&self, kind: AdUnitKind) {
        let client = Arc::clone(&self.client);
        let states = Arc::clone(&self.states);
        let options = self.ad_options(kind);
        let delay = self.config.reprepare_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            prepare_unit(client.as_ref(), &states, kind, options).await;
        });
    }
}

/// Prepare one full-screen unit and record the outcome.
async fn prepare_unit(
    client: &dyn AdServingClient,
    states: &UnitStates,
    kind: AdUnitKind,
    options: AdOptions,
) {
    let (ready, result) = match kind {
        AdUnitKind::Interstitial => (
            &states.interstitial_ready,
            client.prepare_interstitial(&options).await,
        ),
        AdUnitKind::Reward => (&states.reward_ready, client.prepare_reward(&options).await),
        // The banner has no prepare step; it is shown directly.
        AdUnitKind::Banner => return,
    };

    match result {
        Ok(()) => {
            ready.store(true, Ordering::SeqCst);
            tracing::info!(?kind, "Ad unit prepared");
        }
        Err(e) => {
            ready.store(false, Ordering::SeqCst);
            tracing::warn!(?kind, error = %e, "Ad unit prepare failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Consent listener
// ---------------------------------------------------------------------------

/// Forward consent events to the manager until cancelled or the bus closes.
///
/// Spawned by the composition root alongside the manager.
pub async fn run_consent_listener(
    manager: Arc<AdManager>,
    mut receiver: broadcast::Receiver<ConsentEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Consent listener stopping");
                break;
            }
            event = receiver.recv() => match event {
                Ok(event) => manager.handle_consent_event(event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Consent listener lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, consent listener shutting down");
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::client::AdClientError;

    /// Recording fake for the ad SDK. `banner_delay` makes the show call
    /// suspend so tests can race a second call against it.
    #[derive(Default)]
    struct MockAdClient {
        initialize_calls: AtomicUsize,
        banner_show_calls: AtomicUsize,
        banner_hide_calls: AtomicUsize,
        banner_remove_calls: AtomicUsize,
        interstitial_prepare_calls: AtomicUsize,
        interstitial_show_calls: AtomicUsize,
        reward_prepare_calls: AtomicUsize,
        reward_show_calls: AtomicUsize,
        last_banner_options: std::sync::Mutex<Option<BannerOptions>>,
        banner_delay: Option<Duration>,
        fail_banner_show: AtomicBool,
        fail_prepares: AtomicBool,
    }

    #[async_trait]
    impl AdServingClient for MockAdClient {
        async fn initialize(
            &self,
            _testing_devices: &[String],
            _initialize_for_testing: bool,
        ) -> Result<(), AdClientError> {
            self.initialize_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn show_banner(&self, options: &BannerOptions) -> Result<(), AdClientError> {
            if let Some(delay) = self.banner_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_banner_show.load(Ordering::SeqCst) {
                return Err(AdClientError::Network("no fill".into()));
            }
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
            if self.fail_prepares.load(Ordering::SeqCst) {
                return Err(AdClientError::Rejected("no inventory".into()));
            }
            self.interstitial_prepare_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn show_interstitial(&self) -> Result<(), AdClientError> {
            self.interstitial_show_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn prepare_reward(&self, _options: &AdOptions) -> Result<(), AdClientError> {
            if self.fail_prepares.load(Ordering::SeqCst) {
                return Err(AdClientError::Rejected("no inventory".into()));
            }
            self.reward_prepare_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn show_reward(&self) -> Result<(), AdClientError> {
            self.reward_show_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_config() -> AdsConfig {
        let mut config = AdsConfig::from_env();
        config.reprepare_delay = Duration::from_millis(20);
        config
    }

    fn manager_on(platform: Platform, client: Arc<MockAdClient>) -> AdManager {
        AdManager::new(client, test_config(), platform)
    }

    #[tokio::test]
    async fn show_banner_initializes_lazily_and_marks_visible() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;

        assert!(manager.is_initialized());
        assert!(manager.is_banner_visible());
        assert_eq!(client.initialize_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.banner_show_calls.load(Ordering::SeqCst), 1);

        let options = client.last_banner_options.lock().unwrap().clone().unwrap();
        assert_eq!(options.ad_unit_id, manager.config.android.banner);
        assert_eq!(options.margin, BANNER_MARGIN_ANDROID);
        assert_eq!(options.position, BannerPosition::BottomCenter);
    }

    #[tokio::test]
    async fn ios_banner_uses_smaller_margin_and_ios_unit_id() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Ios, Arc::clone(&client));

        manager.show_banner().await;

        let options = client.last_banner_options.lock().unwrap().clone().unwrap();
        assert_eq!(options.ad_unit_id, manager.config.ios.banner);
        assert_eq!(options.margin, BANNER_MARGIN_IOS);
        assert!(BANNER_MARGIN_IOS < BANNER_MARGIN_ANDROID);
    }

    #[tokio::test]
    async fn show_banner_when_visible_is_noop() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        manager.show_banner().await;

        assert_eq!(client.banner_show_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_shows_result_in_one_underlying_call() {
        let client = Arc::new(MockAdClient {
            banner_delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        // The second call starts while the first is suspended in the SDK;
        // it must observe the latch and return without queueing.
        tokio::join!(manager.show_banner(), manager.show_banner());

        assert_eq!(client.banner_show_calls.load(Ordering::SeqCst), 1);
        assert!(manager.is_banner_visible());
    }

    #[tokio::test]
    async fn failed_show_releases_latch_for_retry() {
        let client = Arc::new(MockAdClient::default());
        client.fail_banner_show.store(true, Ordering::SeqCst);
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        assert!(!manager.is_banner_visible());

        client.fail_banner_show.store(false, Ordering::SeqCst);
        manager.show_banner().await;

        assert!(manager.is_banner_visible());
        assert_eq!(client.banner_show_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hide_and_remove_always_attempt_the_underlying_call() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        // Nothing was ever shown; the calls go through anyway.
        manager.hide_banner().await;
        manager.remove_banner().await;

        assert_eq!(client.banner_hide_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.banner_remove_calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_banner_visible());
    }

    #[tokio::test]
    async fn remove_clears_visibility() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        assert!(manager.is_banner_visible());

        manager.remove_banner().await;
        assert!(!manager.is_banner_visible());
    }

    #[tokio::test]
    async fn prepare_before_initialize_is_noop() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.prepare_interstitial().await;
        manager.prepare_reward().await;

        assert_eq!(client.interstitial_prepare_calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.reward_prepare_calls.load(Ordering::SeqCst), 0);
        assert!(!manager.is_interstitial_ready());
    }

    #[tokio::test]
    async fn interstitial_is_single_use_and_reprepares_after_delay() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.initialize().await;
        // Let the fire-and-forget pre-warm tasks settle first.
        tokio::time::sleep(Duration::from_millis(20)).await;
        manager.prepare_interstitial().await;
        assert!(manager.is_interstitial_ready());

        manager.show_interstitial().await;
        assert!(!manager.is_interstitial_ready());
        assert_eq!(client.interstitial_show_calls.load(Ordering::SeqCst), 1);

        // Immediately re-showing is rejected while unprepared.
        manager.show_interstitial().await;
        assert_eq!(client.interstitial_show_calls.load(Ordering::SeqCst), 1);

        // The scheduled re-prepare restores readiness.
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(manager.is_interstitial_ready());
    }

    #[tokio::test]
    async fn show_reward_unprepared_is_noop() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_reward().await;

        assert_eq!(client.reward_show_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn banner_show_prewarms_fullscreen_units() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(client.interstitial_prepare_calls.load(Ordering::SeqCst) >= 1);
        assert!(client.reward_prepare_calls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn prewarm_failure_does_not_affect_banner_outcome() {
        let client = Arc::new(MockAdClient::default());
        client.fail_prepares.store(true, Ordering::SeqCst);
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(manager.is_banner_visible());
        assert!(!manager.is_interstitial_ready());
        assert!(!manager.is_reward_ready());
    }

    #[tokio::test]
    async fn revocation_event_tears_down_ad_state() {
        let client = Arc::new(MockAdClient::default());
        let manager = manager_on(Platform::Android, Arc::clone(&client));

        manager.show_banner().await;
        // Let the pre-warm tasks settle so readiness is stable.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(manager.is_interstitial_ready());

        manager
            .handle_consent_event(ConsentEvent::Changed {
                granted: false,
                non_personalized: false,
            })
            .await;

        assert_eq!(client.banner_remove_calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_banner_visible());
        assert!(!manager.is_interstitial_ready());
        assert!(!manager.is_reward_ready());
    }

    #[tokio::test]
    async fn listener_reacts_to_revocation_and_stops_on_cancel() {
        let client = Arc::new(MockAdClient::default());
        let manager = Arc::new(manager_on(Platform::Android, Arc::clone(&client)));
        let bus = agekit_events::EventBus::default();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run_consent_listener(
            Arc::clone(&manager),
            bus.subscribe(),
            cancel.clone(),
        ));

        manager.show_banner().await;
        bus.publish(ConsentEvent::Changed {
            granted: false,
            non_personalized: false,
        });

        // Wait until the listener has processed the revocation.
        tokio::time::timeout(Duration::from_secs(1), async {
            while client.banner_remove_calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("listener should tear the banner down");

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("listener should stop on cancel")
            .expect("listener task should not panic");
    }
}
