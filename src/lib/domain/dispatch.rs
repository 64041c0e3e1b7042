//! Campaign dispatch: loading, connecting and the send loop.

mod connection;
mod dispatcher;
mod message;

pub mod errors;

pub use connection::{Connection, Connector};
pub use dispatcher::{DispatchSummary, Dispatcher, PREVIEW_DELIMITER, THROTTLE_DELAY};
pub use message::OutboundMessage;
