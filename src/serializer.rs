//! Serialization of the documentation model to YAML or JSON.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

use crate::model::ApiDocumentation;

/// Serializes the documentation to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(docs: &ApiDocumentation) -> Result<String> {
    debug!("Serializing documentation to YAML");
    serde_yaml::to_string(docs).context("Failed to serialize documentation to YAML")
}

/// Serializes the documentation to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(docs: &ApiDocumentation) -> Result<String> {
    debug!("Serializing documentation to JSON");
    serde_json::to_string_pretty(docs).context("Failed to serialize documentation to JSON")
}

/// Writes serialized content to a file, creating parent directories as
/// needed and overwriting an existing file.
///
/// # Errors
///
/// Returns an error if the directories or the file cannot be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ControllerDocumentation, Endpoint};
    use tempfile::TempDir;

    fn create_test_documentation() -> ApiDocumentation {
        ApiDocumentation {
            api_version: "1.0".to_string(),
            swagger_version: "1.1".to_string(),
            base_path: "/api".to_string(),
            apis: vec![Endpoint {
                uri: "/pets".to_string(),
                description: Some("Everything about pets".to_string()),
            }],
            controllers: vec![ControllerDocumentation {
                api_version: "1.0".to_string(),
                swagger_version: "1.1".to_string(),
                base_path: "/api".to_string(),
                resource_path: "/pets".to_string(),
                apis: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_documentation()).unwrap();

        assert!(yaml.contains("apiVersion: '1.0'") || yaml.contains("apiVersion: 1.0"));
        assert!(yaml.contains("basePath: /api"));
        assert!(yaml.contains("uri: /pets"));
        assert!(yaml.contains("description: Everything about pets"));
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&create_test_documentation()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["apiVersion"], "1.0");
        assert_eq!(value["apis"][0]["uri"], "/pets");
        assert_eq!(value["controllers"][0]["resourcePath"], "/pets");
    }

    #[test]
    fn test_write_to_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/docs/api.yaml");

        write_to_file("apiVersion: '1.0'\n", &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "apiVersion: '1.0'\n");
    }
}
