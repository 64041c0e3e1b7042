//! Templates with YAML (`---`) or TOML (`+++`) front matter

use std::path::Path;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{
    campaigns::{Campaign, CampaignLoader, Metadata},
    errors::LoadError,
};

lazy_static! {
    static ref YAML_FRONT_MATTER: Regex =
        Regex::new(r"(?sm)\A---[ \t\r]*\n(.*?)^---[ \t\r]*$\n?(.*)\z").unwrap();
    static ref TOML_FRONT_MATTER: Regex =
        Regex::new(r"(?sm)\A\+\+\+[ \t\r]*\n(.*?)^\+\+\+[ \t\r]*$\n?(.*)\z").unwrap();
}

/// Loads campaign templates from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontMatterLoader;

#[async_trait]
impl CampaignLoader for FrontMatterLoader {
    async fn load_campaign(&self, path: &Path) -> Result<Campaign, LoadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        parse_campaign(path, &raw)
    }
}

/// Splits a template file into its body and metadata
pub fn parse_campaign(path: &Path, raw: &str) -> Result<Campaign, LoadError> {
    if let Some(captures) = YAML_FRONT_MATTER.captures(raw) {
        debug!("found YAML front matter");

        let fields = decode(path, &captures[1], |block| {
            serde_yaml_ng::from_str::<Map<String, Value>>(block).map_err(Into::into)
        })?;

        return Ok(Campaign::new(&captures[2], Metadata::new(fields)));
    }

    if let Some(captures) = TOML_FRONT_MATTER.captures(raw) {
        debug!("found TOML front matter");

        let fields = decode(path, &captures[1], |block| {
            toml::from_str::<Map<String, Value>>(block).map_err(Into::into)
        })?;

        return Ok(Campaign::new(&captures[2], Metadata::new(fields)));
    }

    let opening = raw.lines().next().map(str::trim_end);
    if matches!(opening, Some("---") | Some("+++")) {
        return Err(LoadError::UnterminatedFrontMatter {
            path: path.to_path_buf(),
        });
    }

    Ok(Campaign::new(raw, Metadata::default()))
}

fn decode<F>(path: &Path, block: &str, parse: F) -> Result<Map<String, Value>, LoadError>
where
    F: FnOnce(&str) -> Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>>,
{
    if block.trim().is_empty() {
        return Ok(Map::new());
    }

    parse(block).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
