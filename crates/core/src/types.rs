//! Platform and advertising primitives shared across the workspace.

use serde::{Deserialize, Serialize};

/// The platform the application shell is running on.
///
/// Parsed from configuration (the shell knows its own platform); `Web`
/// covers the browser build, which carries no native ad surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl Platform {
    /// Whether this platform carries the native ad surfaces.
    ///
    /// Ads are a mobile-only concern; the web build renders none.
    pub fn is_mobile(self) -> bool {
        matches!(self, Platform::Ios | Platform::Android)
    }

    /// Whether the platform has an app-tracking permission concept (iOS ATT).
    pub fn has_tracking_permission(self) -> bool {
        matches!(self, Platform::Ios)
    }

    /// Parse a platform name as it appears in configuration.
    ///
    /// Unknown values fall back to `Web`, the no-ads platform.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" => Platform::Ios,
            "android" => Platform::Android,
            _ => Platform::Web,
        }
    }
}

/// Platform-reported app-tracking authorization (iOS ATT).
///
/// Owned by the platform; this system only reads and caches the last-seen
/// value. Platforms without the concept report `Authorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingAuthorization {
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
}

impl TrackingAuthorization {
    pub fn is_authorized(self) -> bool {
        self == TrackingAuthorization::Authorized
    }
}

/// The three advertising surfaces, each with its own readiness lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdUnitKind {
    Banner,
    Interstitial,
    Reward,
}
