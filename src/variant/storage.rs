use super::types::Variant;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(
        "Variant store not found at {}. Run this from the root of the actions repository.",
        .0.display()
    )]
    StoreNotFound(PathBuf),
}

/// Parse the full contents of a store, preserving order
pub fn parse_store(content: &str) -> Vec<Variant> {
    content.lines().filter_map(Variant::parse_line).collect()
}

/// Render variants in store format, every line newline-terminated
pub fn render_store(variants: &[Variant]) -> String {
    variants.iter().map(|v| format!("{v}\n")).collect()
}

/// Read the variant store
pub async fn read_variants(path: &Path) -> Result<Vec<Variant>, VariantError> {
    if !path.is_file() {
        return Err(VariantError::StoreNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).await?;
    Ok(parse_store(&content))
}

/// Replace the variant store, writing atomically via temp file + rename
pub async fn write_variants(path: &Path, variants: &[Variant]) -> Result<(), VariantError> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, render_store(variants)).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_skips_blank_lines() {
        let variants = parse_store("Golang\n\nRuby DEPRECATED\nNode\n");
        assert_eq!(
            variants,
            vec![
                Variant::active("Golang"),
                Variant::deprecated("Ruby"),
                Variant::active("Node"),
            ]
        );
    }

    #[test]
    fn test_render_store() {
        let rendered = render_store(&[Variant::active("PHP"), Variant::deprecated("Scala")]);
        assert_eq!(rendered, "PHP\nScala DEPRECATED\n");
        assert_eq!(render_store(&[]), "");
    }

    #[tokio::test]
    async fn test_read_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_variants(&dir.path().join("variants")).await;
        assert!(matches!(result, Err(VariantError::StoreNotFound(_))));
    }

    #[tokio::test]
    async fn test_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("variants");
        fs::write(&path, "Old\nEntries\nHere\n").await.unwrap();

        write_variants(&path, &[Variant::active("Golang")]).await.unwrap();

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "Golang\n");
        assert!(!dir.path().join("variants.tmp").exists());
    }
}
