//! Consent data model and derivation rules.
//!
//! [`ConsentRecord`] is the persisted user decision; [`ConsentInfo`] is the
//! snapshot derived from it on every read. The derivation is pure so the
//! grant table and expiry behaviour can be tested without any storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long a stored consent decision stays valid. A record older than this
/// is treated as absent on read (the stored bytes are left untouched) and
/// the user is asked again.
pub const CONSENT_VALIDITY_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// The user's explicit advertising-consent decision.
///
/// "Unknown" is represented by the absence of a record: one is only created
/// when the user actually decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentChoice {
    /// Personalized advertising allowed.
    Granted,
    /// No advertising.
    Denied,
    /// Advertising allowed, but requests must be parameterized for
    /// non-personalized serving.
    NonPersonalized,
}

impl ConsentChoice {
    /// Whether this decision permits ad requests at all.
    pub fn allows_ads(self) -> bool {
        matches!(self, ConsentChoice::Granted | ConsentChoice::NonPersonalized)
    }
}

/// Persisted consent decision. Always written whole: choice and timestamp
/// together, never one without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub choice: ConsentChoice,
    /// When the user made the decision (UTC).
    pub decided_at: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn new(choice: ConsentChoice, decided_at: DateTime<Utc>) -> Self {
        Self { choice, decided_at }
    }

    /// Whether the decision has outlived the validity window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.decided_at >= Duration::days(CONSENT_VALIDITY_DAYS)
    }
}

// ---------------------------------------------------------------------------
// Derived snapshot
// ---------------------------------------------------------------------------

/// Consent collection state as exposed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentState {
    Unknown,
    /// Consent collection is not applicable (externally-supplied region
    /// input). Terminal.
    NotRequired,
    /// A decision is needed; the consent UI should be offered.
    Required,
    /// A valid decision is on record.
    Obtained,
}

/// Availability of the consent-collection form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStatus {
    Unknown,
    Available,
    Unavailable,
}

/// Snapshot derived from the stored [`ConsentRecord`]; never persisted.
///
/// Invariant: `can_request_ads` is true only in [`ConsentState::Obtained`]
/// with a stored choice that [`allows_ads`](ConsentChoice::allows_ads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentInfo {
    pub status: ConsentState,
    pub form_status: FormStatus,
    pub can_request_ads: bool,
    pub privacy_options_required: bool,
}

impl ConsentInfo {
    /// The pre-initialization snapshot.
    pub fn unknown() -> Self {
        Self {
            status: ConsentState::Unknown,
            form_status: FormStatus::Unknown,
            can_request_ads: false,
            privacy_options_required: false,
        }
    }

    /// Snapshot for a region where consent collection does not apply.
    pub fn not_required() -> Self {
        Self {
            status: ConsentState::NotRequired,
            form_status: FormStatus::Unavailable,
            can_request_ads: false,
            privacy_options_required: false,
        }
    }

    /// Snapshot for a valid on-record decision.
    pub fn obtained(choice: ConsentChoice) -> Self {
        Self {
            status: ConsentState::Obtained,
            form_status: FormStatus::Unavailable,
            can_request_ads: choice.allows_ads(),
            privacy_options_required: false,
        }
    }

    /// Snapshot when a new decision is needed. `form_available` reflects
    /// whether the consent-collection form actually loaded.
    pub fn required(form_available: bool) -> Self {
        Self {
            status: ConsentState::Required,
            form_status: if form_available {
                FormStatus::Available
            } else {
                FormStatus::Unavailable
            },
            can_request_ads: false,
            privacy_options_required: true,
        }
    }
}
