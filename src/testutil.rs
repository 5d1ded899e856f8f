//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use crate::config::WorkspaceConfig;
use crate::workspace::WORKSPACE_PREFIX;

/// Config with no supplied directories whose temp root is `root`.
#[must_use]
pub fn scratch_config(root: &TempDir) -> WorkspaceConfig {
    WorkspaceConfig::default().with_temp_root(root.path())
}

/// Create a prefixed workspace directory `<root>/<prefix><suffix>`.
#[must_use]
pub fn make_workspace(root: &Path, suffix: &str) -> PathBuf {
    let path = root.join(format!("{WORKSPACE_PREFIX}{suffix}"));
    std::fs::create_dir(&path).unwrap();
    path
}

/// Set the modification time of `path` to `age` in the past.
pub fn backdate(path: &Path, age: Duration) {
    let file = std::fs::File::open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}
