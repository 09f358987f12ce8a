//! The upstream images repository, the source of truth for which variants
//! are still supported.

mod source;

pub use source::SourceOfTruth;

use crate::utils::{UPSTREAM_FEEDS, UPSTREAM_REPOSITORY};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(
        "Upstream repository not found at {path}. Clone it first: git clone {repo} {path}",
        path = .0.display(),
        repo = UPSTREAM_REPOSITORY
    )]
    SourceNotFound(PathBuf),

    #[error(
        "Upstream repository at {} is missing required files: {}",
        .0.display(),
        .1
    )]
    MissingFeeds(PathBuf, String),

    #[error("Cannot match variant against upstream: {0}")]
    Pattern(#[from] regex::Error),
}

/// Check that `path` is an upstream checkout with every required feed
pub fn locate_upstream(path: &Path) -> Result<(), UpstreamError> {
    if !path.is_dir() {
        return Err(UpstreamError::SourceNotFound(path.to_path_buf()));
    }

    let missing: Vec<&str> = UPSTREAM_FEEDS
        .iter()
        .copied()
        .filter(|feed| !path.join(feed).is_file())
        .collect();

    if !missing.is_empty() {
        return Err(UpstreamError::MissingFeeds(
            path.to_path_buf(),
            missing.join(", "),
        ));
    }

    Ok(())
}

/// Load every feed under `path` into a single source of truth.
///
/// A missing feed is only a warning here; `locate_upstream` is the strict
/// check used by the command line.
pub async fn load_source_of_truth(path: &Path) -> Result<SourceOfTruth, UpstreamError> {
    if !path.is_dir() {
        return Err(UpstreamError::SourceNotFound(path.to_path_buf()));
    }

    let mut source = SourceOfTruth::default();

    for feed in UPSTREAM_FEEDS {
        let feed_path = path.join(feed);
        if !feed_path.is_file() {
            warn!(feed = %feed_path.display(), "Upstream feed not found, treating as empty");
            continue;
        }

        let content = fs::read_to_string(&feed_path).await?;
        debug!(feed = %feed, lines = content.lines().count(), "Loaded upstream feed");
        source.add_feed(&content);
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("snyk-images");
        let err = locate_upstream(&missing).unwrap_err();
        assert!(matches!(err, UpstreamError::SourceNotFound(_)));
        assert!(err.to_string().contains("git clone"));
    }

    #[test]
    fn test_locate_lists_missing_feeds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("linux"), "").unwrap();

        let err = locate_upstream(dir.path()).unwrap_err();
        match err {
            UpstreamError::MissingFeeds(_, missing) => assert_eq!(missing, "alpine"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_locate_accepts_complete_checkout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("linux"), "").unwrap();
        std::fs::write(dir.path().join("alpine"), "").unwrap();
        assert!(locate_upstream(dir.path()).is_ok());
    }

    #[tokio::test]
    async fn test_load_tolerates_missing_feed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("linux"), "x Python DEPRECATED\n").unwrap();

        let source = load_source_of_truth(dir.path()).await.unwrap();
        assert!(source.is_deprecated("python"));
        assert!(source.contains_word("Python").unwrap());
    }
}
