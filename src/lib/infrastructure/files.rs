//! File-backed loaders

mod front_matter;
mod recipients;

pub use front_matter::FrontMatterLoader;
pub use recipients::YamlRecipientLoader;
