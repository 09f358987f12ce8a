//! Record of the files the generator produced, used to skip unchanged
//! writes and to prune files of variants that are no longer generated.

mod types;

pub use types::{ActionsManifest, GeneratedFile};

use crate::utils::{get_manifest_path, now_iso, GENERATOR_VERSION};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Read the manifest from the generation root
pub async fn read_manifest(root: &Path) -> Result<Option<ActionsManifest>, ManifestError> {
    let manifest_path = get_manifest_path(root);

    if !manifest_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&manifest_path).await?;
    let manifest: ActionsManifest = serde_json::from_str(&content)?;
    Ok(Some(manifest))
}

/// Write the manifest to the generation root
pub async fn write_manifest(root: &Path, manifest: &ActionsManifest) -> Result<(), ManifestError> {
    let manifest_path = get_manifest_path(root);
    let content = serde_json::to_string_pretty(manifest)?;
    fs::write(&manifest_path, content + "\n").await?;
    Ok(())
}

/// Create a new empty manifest
pub fn create_manifest() -> ActionsManifest {
    let now = now_iso();
    ActionsManifest {
        schema_version: 1,
        generator_version: GENERATOR_VERSION.to_string(),
        created_at: now.clone(),
        updated_at: now,
        generated_files: Vec::new(),
    }
}

/// Replace the file list, bumping the timestamp only if it changed
pub fn set_generated_files(manifest: &mut ActionsManifest, files: Vec<GeneratedFile>) -> bool {
    if manifest.generated_files == files {
        return false;
    }
    manifest.generated_files = files;
    manifest.generator_version = GENERATOR_VERSION.to_string();
    manifest.updated_at = now_iso();
    true
}
