//! Renders the actions, their docs and the test workflow from the variant
//! store.

use crate::config::{read_config, ActionsConfig, ConfigError};
use crate::manifest::{
    create_manifest, read_manifest, set_generated_files, write_manifest, GeneratedFile,
    ManifestError,
};
use crate::template::{
    RootTemplateContext, TemplateEngine, TemplateError, TemplateType, VariantTemplateContext,
};
use crate::utils::{compute_file_hash, compute_hash, get_manifest_path};
use crate::variant::{read_variants, Variant, VariantError};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] ManifestError),

    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),

    #[error(transparent)]
    VariantError(#[from] VariantError),

    #[error("Variant '{0}' cannot be used as a directory name")]
    InvalidVariant(String),
}

/// Options for generating from a store on disk
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Variant store, defaults to `<root>/variants`
    pub variants_path: Option<PathBuf>,
    /// Template directory, overrides the configured one
    pub templates_dir: Option<PathBuf>,
    /// Ref the generated docs point at, overrides the configured default
    pub tag: Option<String>,
}

/// Result of a generation run, paths relative to the root
#[derive(Debug, Clone, Default)]
pub struct GenerateResult {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    pub pruned: Vec<String>,
}

struct RenderedFile {
    path: String,
    content: String,
    variant: Option<String>,
}

/// Read config, store and templates under `root`, then generate
pub async fn generate_from_store(
    root: &Path,
    options: GenerateOptions,
) -> Result<GenerateResult, GenerateError> {
    let config = read_config(root).await?.unwrap_or_default();

    let variants_path = options
        .variants_path
        .unwrap_or_else(|| root.join(crate::utils::VARIANTS_FILE));
    let variants = read_variants(&variants_path).await?;

    let templates_dir = options
        .templates_dir
        .unwrap_or_else(|| root.join(&config.templates_dir));
    let engine = TemplateEngine::load(&templates_dir).await?;

    let tag = options.tag.unwrap_or_else(|| config.default_tag.clone());
    generate_actions(root, &variants, &engine, &config, &tag).await
}

/// Render every file for `variants` into `root`.
///
/// Deprecated variants get no action directory and are left out of the
/// workflow, which is not generated at all when no variant is active.
/// Files recorded by the previous run but not produced by this one are
/// deleted.
pub async fn generate_actions(
    root: &Path,
    variants: &[Variant],
    engine: &TemplateEngine,
    config: &ActionsConfig,
    tag: &str,
) -> Result<GenerateResult, GenerateError> {
    let had_manifest = get_manifest_path(root).exists();
    let mut manifest = read_manifest(root).await?.unwrap_or_else(create_manifest);

    let rendered = render_all(variants, engine, config, tag)?;
    let mut result = GenerateResult::default();

    for file in &rendered {
        let full_path = root.join(&file.path);
        let hash = compute_hash(&file.content);

        if compute_file_hash(&full_path).await.as_deref() == Some(hash.as_str()) {
            debug!(path = %file.path, "Unchanged");
            result.unchanged.push(file.path.clone());
            continue;
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, &file.content).await?;
        result.written.push(file.path.clone());
    }

    let produced: HashSet<&str> = rendered.iter().map(|f| f.path.as_str()).collect();
    for stale in manifest
        .generated_files
        .iter()
        .filter(|f| !produced.contains(f.path.as_str()))
    {
        prune_file(root, &stale.path).await?;
        info!(path = %stale.path, "Removed stale generated file");
        result.pruned.push(stale.path.clone());
    }

    let files = rendered
        .into_iter()
        .map(|f| GeneratedFile {
            hash: compute_hash(&f.content),
            path: f.path,
            variant: f.variant,
        })
        .collect();

    if set_generated_files(&mut manifest, files) || !had_manifest {
        write_manifest(root, &manifest).await?;
    }

    info!(
        written = result.written.len(),
        unchanged = result.unchanged.len(),
        pruned = result.pruned.len(),
        "Generation complete"
    );
    Ok(result)
}

fn render_all(
    variants: &[Variant],
    engine: &TemplateEngine,
    config: &ActionsConfig,
    tag: &str,
) -> Result<Vec<RenderedFile>, GenerateError> {
    let root_context = RootTemplateContext::new(variants, &config.image, tag);
    let mut files = vec![RenderedFile {
        path: "README.md".to_string(),
        content: engine.render(TemplateType::Base, &root_context)?,
        variant: None,
    }];

    for variant in variants.iter().filter(|v| !v.deprecated) {
        info!("Generating Action for {}", variant.identifier);

        let context = VariantTemplateContext::new(variant, &config.image, tag);
        if !is_plain_dirname(&context.dirname) {
            return Err(GenerateError::InvalidVariant(variant.identifier.clone()));
        }

        for (template_type, file_name) in [
            (TemplateType::Action, "action.yml"),
            (TemplateType::Readme, "README.md"),
        ] {
            files.push(RenderedFile {
                path: format!("{}/{}", context.dirname, file_name),
                content: engine.render(template_type, &context)?,
                variant: Some(variant.identifier.clone()),
            });
        }
    }

    // A workflow without jobs is invalid, so it is dropped with the last variant
    if !root_context.variants.is_empty() {
        files.push(RenderedFile {
            path: config.workflow_path.to_string_lossy().replace('\\', "/"),
            content: engine.render(TemplateType::Workflow, &root_context)?,
            variant: None,
        });
    }

    Ok(files)
}

fn is_plain_dirname(dirname: &str) -> bool {
    let mut components = Path::new(dirname).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Delete a generated file and its directory once nothing else is left in it
async fn prune_file(root: &Path, relative_path: &str) -> Result<(), std::io::Error> {
    let full_path = root.join(relative_path);
    if full_path.is_file() {
        fs::remove_file(&full_path).await?;
    }

    let mut dir = full_path.parent();
    while let Some(current) = dir {
        if current == root || !current.starts_with(root) || !current.is_dir() {
            break;
        }
        let mut entries = fs::read_dir(current).await?;
        if entries.next_entry().await?.is_some() {
            break;
        }
        fs::remove_dir(current).await?;
        dir = current.parent();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_dirname() {
        assert!(is_plain_dirname("golang"));
        assert!(is_plain_dirname("python-3.11"));
        assert!(!is_plain_dirname("../escape"));
        assert!(!is_plain_dirname("a/b"));
        assert!(!is_plain_dirname(".."));
        assert!(!is_plain_dirname(""));
    }

    #[tokio::test]
    async fn test_prune_removes_empty_parents() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("ruby")).await.unwrap();
        fs::write(root.join("ruby/action.yml"), "x").await.unwrap();

        prune_file(root, "ruby/action.yml").await.unwrap();

        assert!(!root.join("ruby").exists());
        assert!(root.exists());
    }

    #[tokio::test]
    async fn test_prune_keeps_non_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("ruby")).await.unwrap();
        fs::write(root.join("ruby/action.yml"), "x").await.unwrap();
        fs::write(root.join("ruby/notes.txt"), "keep").await.unwrap();

        prune_file(root, "ruby/action.yml").await.unwrap();

        assert!(!root.join("ruby/action.yml").exists());
        assert!(root.join("ruby/notes.txt").exists());
    }
}
