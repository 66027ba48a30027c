//! Application configuration loaded from environment variables.

use agekit_ads::AdsConfig;
use agekit_core::Platform;

/// Top-level configuration.
///
/// All fields have defaults suitable for local development (web platform,
/// ads enabled, consent required, sample ad unit ids in testing mode).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Platform the shell reports it is running on.
    pub platform: Platform,
    /// Global ads kill switch.
    pub disable_ads: bool,
    /// Whether consent collection applies (region decision, supplied by
    /// the deployment).
    pub consent_required: bool,
    /// Ad unit ids and testing knobs.
    pub ads: AdsConfig,
}

impl AppConfig {
    /// Load `.env` (if present), then read configuration from the
    /// environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `APP_PLATFORM`     | `web`   |
    /// | `DISABLE_ADS`      | `false` |
    /// | `CONSENT_REQUIRED` | `true`  |
    ///
    /// Ad unit id variables are documented on [`AdsConfig::from_env`].
    pub fn from_env() -> Self {
        let platform =
            Platform::from_name(&std::env::var("APP_PLATFORM").unwrap_or_else(|_| "web".into()));

        let disable_ads = std::env::var("DISABLE_ADS")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let consent_required = std::env::var("CONSENT_REQUIRED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self {
            platform,
            disable_ads,
            consent_required,
            ads: AdsConfig::from_env(),
        }
    }
}
