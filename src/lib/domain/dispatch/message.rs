//! Outbound message

use std::fmt;

use lettre::{
    message::{header::ContentType, Mailbox},
    Message,
};

use crate::domain::dispatch::errors::SendError;

/// One recipient's copy of a campaign, built fresh for every recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    to: Mailbox,
    from: Option<Mailbox>,
    subject: String,
    body: String,
}

impl OutboundMessage {
    /// Creates a new plain text message
    pub fn new(to: Mailbox, from: Option<Mailbox>, subject: String, body: String) -> Self {
        Self {
            to,
            from,
            subject,
            body,
        }
    }

    /// The recipient
    pub fn to(&self) -> &Mailbox {
        &self.to
    }

    /// The rendered body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Builds the transmittable message. Fails without a sender.
    pub fn build(&self) -> Result<Message, SendError> {
        let mut builder = Message::builder();
        if let Some(from) = &self.from {
            builder = builder.from(from.clone());
        }

        Ok(builder
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())?)
    }
}

/// Preview rendering. Unlike [`Message::formatted`], it carries no date or message id, so
/// identical inputs always produce identical output.
impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To: {}", self.to)?;
        match &self.from {
            Some(from) => writeln!(f, "From: {from}")?,
            None => writeln!(f, "From: ")?,
        }
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f, "Content-Type: text/plain; charset=utf-8")?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}
