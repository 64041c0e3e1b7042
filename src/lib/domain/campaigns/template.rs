//! Campaign template rendering

use std::fmt;

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{
    campaigns::{errors::TemplateError, Metadata},
    recipients::Recipient,
};

const TEMPLATE_NAME: &str = "email";

/// The data a template sees while rendering one recipient's copy
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    /// The recipient record, as `User`
    #[serde(rename = "User")]
    pub user: &'a Map<String, Value>,

    /// The campaign metadata, as `Campaign`
    #[serde(rename = "Campaign")]
    pub campaign: &'a Map<String, Value>,
}

impl<'a> RenderContext<'a> {
    /// Pairs a recipient with the campaign metadata
    pub fn new(recipient: &'a Recipient, metadata: &'a Metadata) -> Self {
        Self {
            user: recipient.fields(),
            campaign: metadata.fields(),
        }
    }
}

/// A template compiled once per campaign.
///
/// Rendering is strict: any reference to a field missing from the context is an error.
/// The one exception is the condition of an `{{#if}}`/`{{#unless}}` block, where a missing
/// field reads as false, so optional fields can be tested for. Output is plain text, so
/// nothing is HTML-escaped.
pub struct CompiledTemplate {
    registry: Handlebars<'static>,
}

impl CompiledTemplate {
    /// Compiles a template body
    pub fn compile(body: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_template_string(TEMPLATE_NAME, body)?;

        Ok(Self { registry })
    }

    /// Renders the template for one recipient
    pub fn render(&self, context: &RenderContext<'_>) -> Result<String, TemplateError> {
        Ok(self.registry.render(TEMPLATE_NAME, context)?)
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate").finish_non_exhaustive()
    }
}
