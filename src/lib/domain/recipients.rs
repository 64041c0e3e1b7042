//! Recipients module.

mod loader;
mod recipient;

pub use loader::RecipientLoader;
pub use recipient::{Recipient, RecipientError};
