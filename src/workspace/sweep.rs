//! Leftover workspace sweeping
//!
//! Temporary workspaces outlive their process when the owner never calls
//! `cleanup` (crash, `kill -9`, `resolve --keep`). They all carry
//! `WORKSPACE_PREFIX`, so an operator can find and prune them. Entries
//! without the prefix are never touched.
//!
//! A workspace's owner may still be running, and nothing on disk says so.
//! Pruning therefore only removes workspaces whose modification time is at
//! least a minimum age in the past.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::WorkspaceError;
use super::resolver::WORKSPACE_PREFIX;

/// Minimum idle time before `prune` removes a workspace
pub const DEFAULT_MIN_AGE: Duration = Duration::from_secs(60 * 60);

/// Outcome of a prune pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// Workspaces removed (or that would be removed, for a dry run)
    pub removed: Vec<PathBuf>,
    /// Workspaces that could not be removed, with the error message
    pub failed: Vec<PruneFailure>,
    /// Workspaces modified more recently than the minimum age
    pub skipped: Vec<PathBuf>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

/// A workspace that could not be removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PruneFailure {
    /// Workspace path
    pub path: PathBuf,
    /// OS error message
    pub error: String,
}

impl PruneReport {
    /// Returns true if every workspace was removed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Returns true if `path` is a directory named with the workspace prefix.
///
/// Symlinks are not followed.
#[must_use]
pub fn is_ephemeral_workspace(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(WORKSPACE_PREFIX))
        && fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir())
}

/// Time since `path` was last modified. A timestamp in the future counts as zero.
fn idle_time(path: &Path) -> io::Result<Duration> {
    let modified = fs::symlink_metadata(path)?.modified()?;
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}

/// List ephemeral workspaces directly under `root`, sorted by path.
///
/// A missing `root` yields an empty list.
pub fn find_workspaces(root: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "temp root does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut found = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if is_ephemeral_workspace(&path) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Remove every ephemeral workspace under `root` idle for at least `min_age`.
///
/// Younger workspaces are listed as skipped. Per-directory failures are
/// collected in the report rather than aborting the pass. With `dry_run`
/// nothing is removed.
pub fn prune_workspaces(
    root: &Path,
    min_age: Duration,
    dry_run: bool,
) -> Result<PruneReport, WorkspaceError> {
    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };

    for path in find_workspaces(root)? {
        match idle_time(&path) {
            Ok(idle) if idle < min_age => {
                debug!(
                    path = %path.display(),
                    idle_secs = idle.as_secs(),
                    "workspace too recent to prune"
                );
                report.skipped.push(path);
                continue;
            }
            Ok(_) => {}
            // Removed by its owner since the scan
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                report.failed.push(PruneFailure {
                    path,
                    error: e.to_string(),
                });
                continue;
            }
        }

        if dry_run {
            report.removed.push(path);
            continue;
        }
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                info!(path = %path.display(), "pruned workspace");
                report.removed.push(path);
            }
            // Removed concurrently by its owner
            Err(e) if e.kind() == io::ErrorKind::NotFound => report.removed.push(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to prune workspace");
                report.failed.push(PruneFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
