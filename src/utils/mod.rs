mod hash;

pub use hash::{compute_file_hash, compute_hash};

use std::path::{Path, PathBuf};

/// Name of the local variant store
pub const VARIANTS_FILE: &str = "variants";

/// Token appended to a store line to mark the variant deprecated
pub const DEPRECATED_MARKER: &str = "DEPRECATED";

/// Upstream feeds that together form the source of truth
pub const UPSTREAM_FEEDS: [&str; 2] = ["linux", "alpine"];

/// Where the upstream images repository lives
pub const UPSTREAM_REPOSITORY: &str = "https://github.com/snyk/snyk-images";

/// Name of the generated-files manifest
pub const MANIFEST_FILE: &str = ".actions-manifest.json";

/// Current generator version, recorded in the manifest
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the path to the manifest file
pub fn get_manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
