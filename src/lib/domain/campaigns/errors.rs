//! Campaign errors

use lettre::address::AddressError;
use thiserror::Error;

/// Errors raised while compiling or executing a campaign template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template body does not parse
    #[error("template syntax error")]
    Syntax(#[source] Box<handlebars::TemplateError>),

    /// The template references something the render context does not have
    #[error("template render error")]
    Render(#[source] Box<handlebars::RenderError>),
}

impl From<handlebars::TemplateError> for TemplateError {
    fn from(err: handlebars::TemplateError) -> Self {
        TemplateError::Syntax(Box::new(err))
    }
}

impl From<handlebars::RenderError> for TemplateError {
    fn from(err: handlebars::RenderError) -> Self {
        TemplateError::Render(Box::new(err))
    }
}

/// Errors in the campaign-level headers taken from the metadata
#[derive(Debug, Error)]
pub enum CampaignError {
    /// No `from` key in the metadata
    #[error("campaign metadata has no `from` address")]
    MissingSender,

    /// The `from` value is not a mailbox
    #[error("campaign sender `{value}` is not a valid address")]
    InvalidSender {
        /// The offending value
        value: String,

        /// The parse error
        #[source]
        source: AddressError,
    },
}
