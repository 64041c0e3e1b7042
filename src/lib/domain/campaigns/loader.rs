//! Campaign loader

use std::path::Path;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::{campaigns::Campaign, errors::LoadError};

/// Turns a template file into a [`Campaign`]
#[async_trait]
pub trait CampaignLoader: Send + Sync + 'static {
    /// Loads the template body and its metadata from `path`.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the [`Campaign`],
    /// or an [`Err`] containing a [`LoadError`] if the file cannot be read or decoded.
    async fn load_campaign(&self, path: &Path) -> Result<Campaign, LoadError>;
}

#[cfg(test)]
mock! {
    pub CampaignLoader {}

    #[async_trait]
    impl CampaignLoader for CampaignLoader {
        async fn load_campaign(&self, path: &Path) -> Result<Campaign, LoadError>;
    }
}
