//! Errors shared by the campaign and recipient loaders

use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;

use crate::domain::recipients::RecipientError;

/// Errors that can occur when loading a template or a recipient list
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("could not read {}", .path.display())]
    Read {
        /// The file being loaded
        path: PathBuf,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The front matter block was opened but never closed
    #[error("front matter in {} is not terminated", .path.display())]
    UnterminatedFrontMatter {
        /// The file being loaded
        path: PathBuf,
    },

    /// The file contents could not be decoded
    #[error("could not decode {}", .path.display())]
    Decode {
        /// The file being loaded
        path: PathBuf,

        /// The decoder error
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A recipient record is unusable
    #[error("recipient #{index} in {} is invalid", .path.display())]
    Recipient {
        /// The file being loaded
        path: PathBuf,

        /// Zero-based position of the record in the file
        index: usize,

        /// What is wrong with the record
        #[source]
        source: RecipientError,
    },
}
