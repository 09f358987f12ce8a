#![allow(dead_code)]

use async_trait::async_trait;
use snyk_actions::{DownstreamError, DownstreamGenerator};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::fs;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

/// Create an upstream checkout with the given feed contents
pub async fn init_upstream(root: &Path, linux: &str, alpine: &str) -> PathBuf {
    let upstream = root.join("snyk-images");
    fs::create_dir_all(&upstream)
        .await
        .expect("Should create upstream dir");
    fs::write(upstream.join("linux"), linux)
        .await
        .expect("Should write linux feed");
    fs::write(upstream.join("alpine"), alpine)
        .await
        .expect("Should write alpine feed");
    upstream
}

/// Write a variant store and return its path
pub async fn init_variants(root: &Path, content: &str) -> PathBuf {
    let path = root.join("variants");
    fs::write(&path, content)
        .await
        .expect("Should write variant store");
    path
}

/// Generator stand-in that counts invocations
#[derive(Default)]
pub struct RecordingGenerator {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingGenerator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DownstreamGenerator for RecordingGenerator {
    async fn regenerate(&self) -> Result<(), DownstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DownstreamError::SpawnFailed(
                PathBuf::from("generate"),
                std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            ));
        }
        Ok(())
    }
}
