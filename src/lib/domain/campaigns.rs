//! Campaigns module.

mod campaign;
mod loader;
mod template;

pub mod errors;

pub use campaign::{Campaign, CampaignHeaders, Metadata};
pub use loader::CampaignLoader;
pub use template::{CompiledTemplate, RenderContext};
