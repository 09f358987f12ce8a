use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Name of the optional generator configuration file
pub const CONFIG_FILE: &str = "actions.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn default_image() -> String {
    "snyk/snyk".to_string()
}

fn default_tag() -> String {
    "master".to_string()
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("_templates")
}

fn default_workflow_path() -> PathBuf {
    PathBuf::from(".github/workflows/generated.yml")
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsConfig {
    /// Docker image repository; each action runs `<image>:<dirname>`
    #[serde(default = "default_image")]
    pub image: String,
    /// Ref the generated docs point at when no tag is given
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Template directory, relative to the generation root
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Generated workflow, relative to the generation root
    #[serde(default = "default_workflow_path")]
    pub workflow_path: PathBuf,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            default_tag: default_tag(),
            templates_dir: default_templates_dir(),
            workflow_path: default_workflow_path(),
        }
    }
}

/// Read the configuration file
pub async fn read_config(root: &Path) -> Result<Option<ActionsConfig>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).await?;
    let config: ActionsConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ActionsConfig = serde_json::from_str(r#"{"image": "acme/scanner"}"#).unwrap();
        assert_eq!(config.image, "acme/scanner");
        assert_eq!(config.default_tag, "master");
        assert_eq!(config.templates_dir, PathBuf::from("_templates"));
    }

    #[tokio::test]
    async fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_config(dir.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_config_from_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"defaultTag": "v1", "workflowPath": "ci/actions.yml"}"#,
        )
        .await
        .unwrap();

        let config = read_config(dir.path()).await.unwrap().unwrap();
        assert_eq!(config.default_tag, "v1");
        assert_eq!(config.workflow_path, PathBuf::from("ci/actions.yml"));
        assert_eq!(config.image, "snyk/snyk");
    }
}
