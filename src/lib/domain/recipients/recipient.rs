//! Recipient record

use lettre::{address::AddressError, message::Mailbox, Address};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::as_text;

/// An error that can occur when creating a recipient
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipientError {
    /// A required field is absent or not a scalar
    #[error("missing `{0}` field")]
    MissingField(&'static str),
}

/// One line item of the recipient list.
///
/// `email` and `username` are required. The full record, extra fields included, is what the
/// template sees as `User`.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipient {
    email: String,
    username: String,
    fields: Map<String, Value>,
}

impl Recipient {
    /// Creates a recipient from a decoded record
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, RecipientError> {
        let email = fields
            .get("email")
            .and_then(as_text)
            .ok_or(RecipientError::MissingField("email"))?;
        let username = fields
            .get("username")
            .and_then(as_text)
            .ok_or(RecipientError::MissingField("username"))?;

        Ok(Self {
            email,
            username,
            fields,
        })
    }

    /// The recipient's address, as given
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The recipient's display name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The full record
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The `To` mailbox for this recipient
    pub fn mailbox(&self) -> Result<Mailbox, AddressError> {
        let address = self.email.trim().parse::<Address>()?;
        let name = Some(self.username.clone()).filter(|name| !name.is_empty());

        Ok(Mailbox::new(name, address))
    }
}
