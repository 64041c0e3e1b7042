//! Campaign model

use lettre::message::Mailbox;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{as_text, campaigns::errors::CampaignError};

/// Campaign-level metadata, read from the template's front matter.
///
/// `from` and `subject` become message headers. Every key, including those two, is visible to
/// the template as `Campaign.<key>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    /// Wraps a decoded front matter mapping
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// All metadata fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `from` value as text, if present and scalar
    pub fn from_address(&self) -> Option<String> {
        self.0.get("from").and_then(as_text)
    }

    /// The `subject` value as text, if present and scalar
    pub fn subject(&self) -> Option<String> {
        self.0.get("subject").and_then(as_text)
    }

    /// Resolves the headers shared by every message of the campaign.
    ///
    /// A `from` that is present must parse; a missing one is left to
    /// [`CampaignHeaders::sender`]. A missing subject is sent as an empty one.
    pub fn headers(&self) -> Result<CampaignHeaders, CampaignError> {
        let from = match self.from_address() {
            None => None,
            Some(value) => match value.parse::<Mailbox>() {
                Ok(from) => Some(from),
                Err(source) => return Err(CampaignError::InvalidSender { value, source }),
            },
        };

        let subject = self.subject().unwrap_or_else(|| {
            warn!("campaign metadata has no subject");
            String::new()
        });

        Ok(CampaignHeaders { from, subject })
    }
}

/// Headers shared by every message in a campaign
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignHeaders {
    /// The sender, if the metadata names one
    pub from: Option<Mailbox>,

    /// The subject line
    pub subject: String,
}

impl CampaignHeaders {
    /// The sender, required for anything that leaves the machine
    pub fn sender(&self) -> Result<&Mailbox, CampaignError> {
        self.from.as_ref().ok_or(CampaignError::MissingSender)
    }
}

/// A loaded campaign: the raw template body and its metadata
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Campaign {
    /// Template source, without the front matter
    pub body: String,

    /// Front matter
    pub metadata: Metadata,
}

impl Campaign {
    /// Creates a new campaign
    pub fn new(body: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            body: body.into(),
            metadata,
        }
    }
}
