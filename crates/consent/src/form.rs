//! Consent-collection form capability.
//!
//! The consent dialog itself is external (platform UI); what this core
//! needs is to load its script/resources before the form can be offered.
//! The manager bounds the load with a timeout so a hanging resource turns
//! into a reported error instead of blocking initialization.

use async_trait::async_trait;

/// Errors from loading the consent-collection resources.
#[derive(Debug, thiserror::Error)]
pub enum FormLoadError {
    /// The external script or resource failed to load.
    #[error("consent form resources failed to load: {0}")]
    Load(String),
}

/// Loads the external consent-collection resources.
#[async_trait]
pub trait ConsentFormLoader: Send + Sync {
    async fn load(&self) -> Result<(), FormLoadError>;
}

/// Loader for platforms where the form ships with the app bundle and
/// nothing needs fetching.
pub struct NoopFormLoader;

#[async_trait]
impl ConsentFormLoader for NoopFormLoader {
    async fn load(&self) -> Result<(), FormLoadError> {
        Ok(())
    }
}
