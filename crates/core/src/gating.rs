//! The pure "may ads display now" decision.
//!
//! Kept free of side effects so the policy is independently testable; the
//! provider layer gathers the four facts and calls in here before every
//! externally visible show operation.

use crate::types::{Platform, TrackingAuthorization};

/// Whether an ad may be requested and displayed right now.
///
/// All four legs must hold: the platform carries ad surfaces, the global
/// kill switch is off, the consent machine allows requests, and tracking is
/// authorized (or the platform has no tracking-permission concept).
pub fn should_show_ads(
    is_mobile: bool,
    ads_disabled: bool,
    can_request_ads: bool,
    tracking_authorized: bool,
) -> bool {
    is_mobile && !ads_disabled && can_request_ads && tracking_authorized
}

/// Resolve the tracking leg of the policy for a platform.
///
/// Platforms without a tracking-permission concept (everything but iOS)
/// count as authorized; on iOS the last-seen platform status decides.
pub fn tracking_satisfied(platform: Platform, status: TrackingAuthorization) -> bool {
    if !platform.has_tracking_permission() {
        return true;
    }
    status.is_authorized()
}
