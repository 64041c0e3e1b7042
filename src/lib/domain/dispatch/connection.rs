//! Transport connection seams

use async_trait::async_trait;
use lettre::Message;

#[cfg(test)]
use mockall::mock;

use crate::domain::dispatch::errors::{ConnectError, SendError};

/// An open, authenticated transport connection
#[async_trait]
pub trait Connection: Send {
    /// Transmits one message
    async fn send(&mut self, message: Message) -> Result<(), SendError>;

    /// Releases the connection. Sending after this fails.
    async fn close(&mut self);
}

/// Opens [`Connection`]s
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Opens a connection, wrapped for signing if signing is configured.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the open connection,
    /// or an [`Err`] containing a [`ConnectError`] if it could not be established.
    async fn connect(&self) -> Result<Box<dyn Connection>, ConnectError>;
}

#[cfg(test)]
mock! {
    pub Connection {}

    #[async_trait]
    impl Connection for Connection {
        async fn send(&mut self, message: Message) -> Result<(), SendError>;
        async fn close(&mut self);
    }
}

#[cfg(test)]
mock! {
    pub Connector {}

    #[async_trait]
    impl Connector for Connector {
        async fn connect(&self) -> Result<Box<dyn Connection>, ConnectError>;
    }
}
