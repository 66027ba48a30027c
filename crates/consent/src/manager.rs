//! The consent state machine.
//!
//! States: `Unknown → Required → Obtained`, back to `Unknown` on reset;
//! `NotRequired` is terminal and reachable only when the composition root
//! says consent collection is not applicable (region input). Mutations
//! persist the whole record first, then update the snapshot, then broadcast
//! a [`ConsentEvent::Changed`] when the net decision actually changed.
//!
//! Nothing here returns an error to the caller: storage and form failures
//! are logged and degrade to the no-ads path, never to a crash.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use agekit_core::{ConsentChoice, ConsentInfo};
use agekit_events::{ConsentEvent, EventBus};
use agekit_store::ConsentStore;

use crate::form::ConsentFormLoader;

/// Upper bound on the consent-form resource load. A hang converts into a
/// reported error so initialization completes in degraded (no-ads) mode.
pub const SCRIPT_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Derives [`ConsentInfo`] from persisted state and owns the mutations.
///
/// Constructed once at application start and shared via `Arc`.
pub struct ConsentManager {
    store: ConsentStore,
    form: Arc<dyn ConsentFormLoader>,
    bus: Arc<EventBus>,
    info: RwLock<ConsentInfo>,
    /// Held across the first `initialize` so a second call is a no-op and
    /// cannot re-trigger the consent form mid-session.
    initialized: Mutex<bool>,
    consent_required: bool,
    script_timeout: Duration,
}

impl ConsentManager {
    pub fn new(store: ConsentStore, form: Arc<dyn ConsentFormLoader>, bus: Arc<EventBus>) -> Self {
        Self {
            store,
            form,
            bus,
            info: RwLock::new(ConsentInfo::unknown()),
            initialized: Mutex::new(false),
            consent_required: true,
            script_timeout: SCRIPT_LOAD_TIMEOUT,
        }
    }

    /// Mark consent collection as not applicable (externally-supplied
    /// region decision). Defaults to requiring consent.
    pub fn with_consent_required(mut self, required: bool) -> Self {
        self.consent_required = required;
        self
    }

    /// Override the form-load timeout (tests use a short one).
    pub fn with_script_timeout(mut self, timeout: Duration) -> Self {
        self.script_timeout = timeout;
        self
    }

    // -- lifecycle ----------------------------------------------------------

    /// Resolve the initial consent state.
    ///
    /// Idempotent: only the first call does any work, so the consent form
    /// can never be re-triggered by a second initialization. Always
    /// completes: a form-load failure or timeout leaves the machine in
    /// `Required` with the form unavailable and the app usable without ads.
    pub async fn initialize(&self) {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            tracing::debug!("Consent manager already initialized");
            return;
        }

        if !self.consent_required {
            *self.info.write().await = ConsentInfo::not_required();
            *initialized = true;
            tracing::info!("Consent collection not applicable, skipping form flow");
            return;
        }

        let now = Utc::now();
        if let Some(record) = self.store.read(now).await {
            *self.info.write().await = ConsentInfo::obtained(record.choice);
            tracing::info!(
                choice = ?record.choice,
                decided_at = %record.decided_at,
                "Valid consent decision on record"
            );
        } else {
            let form_available =
                match tokio::time::timeout(self.script_timeout, self.form.load()).await {
                    Ok(Ok(())) => true,
                    Ok(Err(e)) => {
                        tracing::warn!(error = %e, "Consent form load failed, continuing without ads");
                        false
                    }
                    Err(_) => {
                        tracing::warn!(
                            timeout_ms = self.script_timeout.as_millis() as u64,
                            "Consent form load timed out, continuing without ads"
                        );
                        false
                    }
                };

            *self.info.write().await = ConsentInfo::required(form_available);
            if form_available {
                self.bus.publish(ConsentEvent::ShowForm);
            }
            tracing::info!(form_available, "Consent required, decision pending");
        }

        *initialized = true;
    }

    // -- mutations ----------------------------------------------------------

    /// Record consent to personalized advertising.
    pub async fn grant(&self) {
        self.apply_choice(ConsentChoice::Granted).await;
    }

    /// Record consent to non-personalized advertising only. Downstream ad
    /// requests must be parameterized accordingly by the ad SDK.
    pub async fn grant_non_personalized(&self) {
        self.apply_choice(ConsentChoice::NonPersonalized).await;
    }

    /// Record refusal of advertising.
    pub async fn deny(&self) {
        self.apply_choice(ConsentChoice::Denied).await;
    }

    /// Forget the stored decision (user-initiated opt-out). The ad layer
    /// reacts to the emitted event by tearing down live ad state.
    pub async fn reset(&self) {
        let now = Utc::now();
        let previous = self.store.read(now).await.map(|r| r.choice);

        if let Err(e) = self.store.clear().await {
            tracing::error!(error = %e, "Failed to clear consent record");
        }
        *self.info.write().await = ConsentInfo::unknown();

        if previous.is_some() {
            self.bus.publish(ConsentEvent::Changed {
                granted: false,
                non_personalized: false,
            });
        }
        tracing::info!("Consent reset");
    }

    async fn apply_choice(&self, choice: ConsentChoice) {
        let now = Utc::now();
        let previous = self.store.read(now).await.map(|r| r.choice);

        if let Err(e) = self.store.write(choice, now).await {
            // The in-session decision still stands; the next launch will
            // simply ask again.
            tracing::error!(error = %e, ?choice, "Failed to persist consent decision");
        }
        *self.info.write().await = ConsentInfo::obtained(choice);

        if previous != Some(choice) {
            self.bus.publish(ConsentEvent::Changed {
                granted: choice.allows_ads(),
                non_personalized: choice == ConsentChoice::NonPersonalized,
            });
        }
        tracing::info!(?choice, "Consent decision recorded");
    }

    // -- queries and UI triggers --------------------------------------------

    /// Current snapshot.
    pub async fn consent_info(&self) -> ConsentInfo {
        *self.info.read().await
    }

    pub async fn can_request_ads(&self) -> bool {
        self.info.read().await.can_request_ads
    }

    /// Ask the external UI to show the consent-collection form.
    pub fn show_consent_form(&self) {
        self.bus.publish(ConsentEvent::ShowForm);
    }

    /// Ask the external UI to show the privacy-options form.
    pub fn show_privacy_options(&self) {
        self.bus.publish(ConsentEvent::ShowPrivacyOptions);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
