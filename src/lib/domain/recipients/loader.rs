//! Recipient loader

use std::path::Path;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::{errors::LoadError, recipients::Recipient};

/// Turns a recipient file into an ordered list of [`Recipient`]s
#[async_trait]
pub trait RecipientLoader: Send + Sync + 'static {
    /// Loads every recipient in `path`, in file order.
    async fn load_recipients(&self, path: &Path) -> Result<Vec<Recipient>, LoadError>;
}

#[cfg(test)]
mock! {
    pub RecipientLoader {}

    #[async_trait]
    impl RecipientLoader for RecipientLoader {
        async fn load_recipients(&self, path: &Path) -> Result<Vec<Recipient>, LoadError>;
    }
}
