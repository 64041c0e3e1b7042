//! YAML recipient lists. JSON lists load too, being valid YAML.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{
    errors::LoadError,
    recipients::{Recipient, RecipientLoader},
};

/// Loads recipient lists from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlRecipientLoader;

#[async_trait]
impl RecipientLoader for YamlRecipientLoader {
    async fn load_recipients(&self, path: &Path) -> Result<Vec<Recipient>, LoadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        parse_recipients(path, &raw)
    }
}

/// Decodes a recipient list, keeping file order
pub fn parse_recipients(path: &Path, raw: &str) -> Result<Vec<Recipient>, LoadError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<Map<String, Value>> =
        serde_yaml_ng::from_str(raw).map_err(|e| LoadError::Decode {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, fields)| {
            Recipient::from_fields(fields).map_err(|source| LoadError::Recipient {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::domain::recipients::RecipientError;

    use super::*;

    fn parse(raw: &str) -> Result<Vec<Recipient>, LoadError> {
        parse_recipients(Path::new("recipients.yaml"), raw)
    }

    #[test]
    fn test_recipients_keep_file_order() -> TestResult {
        let recipients = parse(
            "- email: c@y.com\n  username: Carol\n\
             - email: a@y.com\n  username: Alice\n\
             - email: c@y.com\n  username: Carol again\n",
        )?;

        let emails: Vec<&str> = recipients.iter().map(Recipient::email).collect();
        assert_eq!(emails, vec!["c@y.com", "a@y.com", "c@y.com"]);

        Ok(())
    }

    #[test]
    fn test_extra_fields_pass_through() -> TestResult {
        let recipients = parse("- email: b@y.com\n  username: Bob\n  plan: pro\n")?;

        assert_eq!(recipients[0].fields().get("plan"), Some(&json!("pro")));

        Ok(())
    }

    #[test]
    fn test_json_list() -> TestResult {
        let recipients = parse(r#"[{"email": "b@y.com", "username": "Bob"}]"#)?;

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].username(), "Bob");

        Ok(())
    }

    #[test]
    fn test_empty_file_is_empty_list() -> TestResult {
        assert!(parse("\n")?.is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_field_names_the_record() {
        let result = parse(
            "- email: a@y.com\n  username: Alice\n\
             - email: b@y.com\n",
        );

        assert!(matches!(
            result,
            Err(LoadError::Recipient {
                index: 1,
                source: RecipientError::MissingField("username"),
                ..
            })
        ));
    }

    #[test]
    fn test_not_a_list() {
        let result = parse("email: b@y.com\nusername: Bob\n");

        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_load_recipients_from_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "- email: b@y.com\n  username: Bob")?;

        let recipients = YamlRecipientLoader.load_recipients(file.path()).await?;

        assert_eq!(recipients[0].email(), "b@y.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = YamlRecipientLoader
            .load_recipients(Path::new("/nonexistent/recipients.yaml"))
            .await;

        assert!(matches!(result, Err(LoadError::Read { .. })));
    }
}
