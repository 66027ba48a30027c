//! Typed persistence for the consent record.
//!
//! The record is serialized as a single JSON document under one key so the
//! choice and its timestamp can never be observed partially. Reads fail
//! closed: a backend error, corrupt value, or expired record all read as
//! "no consent recorded".

use std::sync::Arc;

use chrono::{DateTime, Utc};

use agekit_core::{ConsentChoice, ConsentRecord};

use crate::kv::{KeyValueStore, StoreError};

/// Storage key for the serialized [`ConsentRecord`].
const CONSENT_RECORD_KEY: &str = "consent.record";

/// Reads and writes the persisted consent decision.
pub struct ConsentStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ConsentStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read the current record, treating errors, corrupt values, and
    /// expired records as absent.
    ///
    /// Expiry is applied on read only; the stored bytes are not rewritten.
    pub async fn read(&self, now: DateTime<Utc>) -> Option<ConsentRecord> {
        let raw = match self.kv.get(CONSENT_RECORD_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Consent record read failed, treating as absent");
                return None;
            }
        };

        let record: ConsentRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Consent record corrupt, treating as absent");
                return None;
            }
        };

        if record.is_expired(now) {
            tracing::debug!(decided_at = %record.decided_at, "Consent record expired");
            return None;
        }

        Some(record)
    }

    /// Overwrite the record with a new decision. Choice and timestamp are
    /// written together as one document.
    pub async fn write(&self, choice: ConsentChoice, now: DateTime<Utc>) -> Result<(), StoreError> {
        let record = ConsentRecord::new(choice, now);
        let json = serde_json::to_string(&record)
            .map_err(|e| StoreError::Backend(format!("serialize consent record: {e}")))?;
        self.kv.set(CONSENT_RECORD_KEY, &json).await
    }

    /// Remove the record entirely (user-initiated reset).
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(CONSENT_RECORD_KEY).await
    }
}
