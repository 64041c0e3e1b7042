//! Dispatch errors

use std::{io, path::PathBuf};

use lettre::address::AddressError;
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    campaigns::errors::{CampaignError, TemplateError},
    errors::LoadError,
};

/// Fatal errors. Each variant names the phase that failed and keeps the underlying cause.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The template or recipient list could not be loaded
    #[error("loading failed")]
    Load(#[from] LoadError),

    /// The template could not be compiled or rendered
    #[error("rendering failed")]
    Template(#[from] TemplateError),

    /// The campaign headers are unusable
    #[error("campaign metadata is invalid")]
    Campaign(#[from] CampaignError),

    /// The transport connection could not be established
    #[error("connecting failed")]
    Connect(#[from] ConnectError),

    /// The dry-run preview could not be written
    #[error("writing the preview failed")]
    Preview(#[from] io::Error),
}

/// Errors opening a transport connection
#[derive(Debug, Error)]
pub enum ConnectError {
    /// No transport URL was configured
    #[error("no transport URL configured")]
    MissingUrl,

    /// The transport URL does not parse
    #[error("invalid transport URL")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport URL has no host
    #[error("transport URL has no host")]
    MissingHost,

    /// The server could not be reached or refused the session
    #[error("could not connect to {host}:{port}")]
    Transport {
        /// The server host
        host: String,

        /// The server port
        port: u16,

        /// The transport error
        #[source]
        source: lettre::transport::smtp::Error,
    },

    /// The server answered but the connection test failed
    #[error("{host}:{port} rejected the connection")]
    Rejected {
        /// The server host
        host: String,

        /// The server port
        port: u16,
    },

    /// Signing was requested but could not be set up
    #[error("could not set up message signing")]
    Signing(#[from] SigningConfigError),
}

/// Errors in the DKIM signing configuration
#[derive(Debug, Error)]
pub enum SigningConfigError {
    /// Neither a key nor a key file was given
    #[error("no signing key configured")]
    MissingKey,

    /// No selector was given
    #[error("no signing selector configured")]
    MissingSelector,

    /// No signing domain was given
    #[error("no signing domain configured")]
    MissingDomain,

    /// The key file could not be read
    #[error("could not read signing key {}", .path.display())]
    ReadKey {
        /// The key file
        path: PathBuf,

        /// The I/O error
        #[source]
        source: io::Error,
    },

    /// The key material does not parse
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

/// Per-recipient delivery errors. These never abort a campaign.
#[derive(Debug, Error)]
pub enum SendError {
    /// The recipient address does not parse
    #[error("invalid recipient address")]
    InvalidAddress(#[from] AddressError),

    /// The message could not be assembled
    #[error("could not build the message")]
    Build(#[from] lettre::error::Error),

    /// The connection was already closed
    #[error("connection is closed")]
    Closed,

    /// The transport failed to deliver the message
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl From<anyhow::Error> for SendError {
    fn from(err: anyhow::Error) -> Self {
        SendError::Transport(err)
    }
}

impl From<lettre::transport::smtp::Error> for SendError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        debug!("smtp::Error -> SendError");

        SendError::Transport(err.into())
    }
}
