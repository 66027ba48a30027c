//! Ad configuration loaded from environment variables.
//!
//! All fields default to Google's published sample ad unit ids with testing
//! mode on, so a development build never serves (or earns from) real ads.
//! Production overrides everything via environment variables.

use std::time::Duration;

use agekit_core::Platform;

/// Delay before a shown interstitial/reward unit is prepared again, so the
/// ad network is not hammered synchronously after every show.
pub const DEFAULT_REPREPARE_DELAY: Duration = Duration::from_secs(1);

/// Ad unit ids for one platform.
#[derive(Debug, Clone)]
pub struct AdUnitIds {
    pub banner: String,
    pub interstitial: String,
    pub reward: String,
}

/// Ad serving configuration.
#[derive(Debug, Clone)]
pub struct AdsConfig {
    pub ios: AdUnitIds,
    pub android: AdUnitIds,
    /// Request test ads only.
    pub is_testing: bool,
    /// Device ids registered as test devices with the ad SDK.
    pub testing_devices: Vec<String>,
    /// Pass the testing flag to SDK initialization as well.
    pub initialize_for_testing: bool,
    /// Delay before re-preparing a shown full-screen unit.
    pub reprepare_delay: Duration,
}

impl AdsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                      |
    /// |------------------------------|------------------------------|
    /// | `ADMOB_IOS_BANNER_ID`        | Google sample banner id      |
    /// | `ADMOB_IOS_INTERSTITIAL_ID`  | Google sample interstitial id|
    /// | `ADMOB_IOS_REWARD_ID`        | Google sample reward id      |
    /// | `ADMOB_ANDROID_BANNER_ID`    | Google sample banner id      |
    /// | `ADMOB_ANDROID_INTERSTITIAL_ID` | Google sample interstitial id |
    /// | `ADMOB_ANDROID_REWARD_ID`    | Google sample reward id      |
    /// | `ADMOB_TESTING_MODE`         | `true`                       |
    /// | `ADMOB_TESTING_DEVICES`      | empty (comma-separated list) |
    pub fn from_env() -> Self {
        let is_testing = env_bool("ADMOB_TESTING_MODE", true);

        Self {
            ios: AdUnitIds {
                banner: env_or("ADMOB_IOS_BANNER_ID", "ca-app-pub-3940256099942544/2934735716"),
                interstitial: env_or(
                    "ADMOB_IOS_INTERSTITIAL_ID",
                    "ca-app-pub-3940256099942544/4411468910",
                ),
                reward: env_or("ADMOB_IOS_REWARD_ID", "ca-app-pub-3940256099942544/1712485313"),
            },
            android: AdUnitIds {
                banner: env_or(
                    "ADMOB_ANDROID_BANNER_ID",
                    "ca-app-pub-3940256099942544/6300978111",
                ),
                interstitial: env_or(
                    "ADMOB_ANDROID_INTERSTITIAL_ID",
                    "ca-app-pub-3940256099942544/1033173712",
                ),
                reward: env_or(
                    "ADMOB_ANDROID_REWARD_ID",
                    "ca-app-pub-3940256099942544/5224354917",
                ),
            },
            is_testing,
            testing_devices: env_list("ADMOB_TESTING_DEVICES"),
            initialize_for_testing: is_testing,
            reprepare_delay: DEFAULT_REPREPARE_DELAY,
        }
    }

    /// Unit ids for the running platform. The web build never reaches the
    /// ad SDK, so anything non-iOS maps to the Android table.
    pub fn unit_ids(&self, platform: Platform) -> &AdUnitIds {
        match platform {
            Platform::Ios => &self.ios,
            Platform::Android | Platform::Web => &self.android,
        }
    }
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => value.trim().eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
