//! DKIM signing

use std::{fmt, path::PathBuf};

use async_trait::async_trait;
use clap::{Args, ValueEnum};
use lettre::{
    message::dkim::{
        DkimConfig as SigningConfig, DkimSigningAlgorithm, DkimSigningKey,
    },
    Message,
};
use tracing::{debug, warn};

use crate::domain::dispatch::{
    errors::{ConnectError, SendError, SigningConfigError},
    Connection,
};

/// DKIM key algorithm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DkimAlgorithm {
    /// RSA key in PEM form
    #[default]
    Rsa,

    /// Ed25519 key, base64 encoded
    Ed25519,
}

impl From<DkimAlgorithm> for DkimSigningAlgorithm {
    fn from(algorithm: DkimAlgorithm) -> Self {
        match algorithm {
            DkimAlgorithm::Rsa => DkimSigningAlgorithm::Rsa,
            DkimAlgorithm::Ed25519 => DkimSigningAlgorithm::Ed25519,
        }
    }
}

/// DKIM configuration. Leaving every field unset disables signing.
#[derive(Clone, Default, Args)]
pub struct DkimConfig {
    /// Path to the private signing key
    #[arg(long = "dkim-key-file", env = "DKIM_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// The private signing key itself; takes precedence over the key file
    #[arg(long = "dkim-key", env = "DKIM_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// The DNS selector the public key is published under
    #[arg(long = "dkim-selector", env = "DKIM_SELECTOR")]
    pub selector: Option<String>,

    /// The signing domain
    #[arg(long = "dkim-domain", env = "DKIM_DOMAIN")]
    pub domain: Option<String>,

    /// The key algorithm
    #[arg(
        long = "dkim-algorithm",
        env = "DKIM_ALGORITHM",
        value_enum,
        default_value_t = DkimAlgorithm::Rsa
    )]
    pub algorithm: DkimAlgorithm,
}

impl DkimConfig {
    /// True when no signing setting was given at all
    pub fn is_empty(&self) -> bool {
        self.key_file.is_none()
            && self.key.is_none()
            && self.selector.is_none()
            && self.domain.is_none()
    }

    /// Checks the configuration and loads the key.
    pub async fn signing_config(&self) -> Result<SigningConfig, SigningConfigError> {
        let pem = match (&self.key, &self.key_file) {
            (Some(key), _) => key.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path).await.map_err(|source| {
                SigningConfigError::ReadKey {
                    path: path.clone(),
                    source,
                }
            })?,
            (None, None) => return Err(SigningConfigError::MissingKey),
        };

        let selector = non_empty(&self.selector).ok_or(SigningConfigError::MissingSelector)?;
        let domain = non_empty(&self.domain).ok_or(SigningConfigError::MissingDomain)?;

        let key = DkimSigningKey::new(pem.trim(), self.algorithm.into())
            .map_err(|e| SigningConfigError::InvalidKey(e.to_string()))?;

        debug!(%selector, %domain, "loaded DKIM signing key");

        Ok(SigningConfig::default_config(selector, domain, key))
    }
}

impl fmt::Debug for DkimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DkimConfig")
            .field("key_file", &self.key_file)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("selector", &self.selector)
            .field("domain", &self.domain)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Signs every message before handing it to the wrapped connection
pub struct SigningConnection {
    inner: Box<dyn Connection>,
    config: SigningConfig,
}

impl SigningConnection {
    /// Wraps `inner`
    pub fn new(inner: Box<dyn Connection>, config: SigningConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl Connection for SigningConnection {
    async fn send(&mut self, mut message: Message) -> Result<(), SendError> {
        message.sign(&self.config);

        self.inner.send(message).await
    }

    async fn close(&mut self) {
        self.inner.close().await;
    }
}

impl fmt::Debug for SigningConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConnection").finish_non_exhaustive()
    }
}

/// Layers signing over an open connection. On failure the connection is closed before the
/// error is returned.
pub async fn sign_connection(
    mut connection: Box<dyn Connection>,
    config: &DkimConfig,
) -> Result<Box<dyn Connection>, ConnectError> {
    match config.signing_config().await {
        Ok(signing) => Ok(Box::new(SigningConnection::new(connection, signing))),
        Err(e) => {
            warn!(error = %e, "DKIM configuration is unusable");
            connection.close().await;

            Err(e.into())
        }
    }
}
