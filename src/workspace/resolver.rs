//! Working directory resolver
//!
//! Picks the directory the wrapper runs `claude` in. Precedence is the
//! explicit path, then `CLAUDE_CWD`, then a freshly created temporary
//! workspace under the temp root. Supplied paths must exist; nothing else
//! about them is checked.
//!
//! A temporary workspace belongs to the resolver that created it and is
//! only removed when the owner calls `cleanup`. There is no drop hook.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::error::{ConfigurationError, WorkspaceError};
use crate::config::WorkspaceConfig;

/// Name prefix of every temporary workspace
pub const WORKSPACE_PREFIX: &str = "claude_code_workspace_";

/// Which precedence step produced the working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    /// Explicit directory argument
    Explicit,
    /// `CLAUDE_CWD` environment variable
    Environment,
    /// Fallback temporary workspace
    Temporary,
}

impl std::fmt::Display for DirectorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Explicit => "explicit",
            Self::Environment => "environment",
            Self::Temporary => "temporary",
        };
        f.write_str(label)
    }
}

/// Snapshot of a resolution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedWorkingDirectory {
    /// Resolved working directory
    pub path: PathBuf,
    /// True if the resolver created `path` and owns its removal
    pub is_temporary: bool,
    /// Which precedence step produced `path`
    pub source: DirectorySource,
}

/// Resolves and holds the working directory for one wrapper instance
#[derive(Debug)]
pub struct DirectoryResolver {
    cwd: PathBuf,
    source: DirectorySource,
    temp_dir: Option<PathBuf>,
}

impl DirectoryResolver {
    /// Resolve the working directory from `config`.
    ///
    /// Supplied directories are validated for existence. Without one, a new
    /// temporary workspace is created under `config.temp_root`.
    pub fn new(config: &WorkspaceConfig) -> Result<Self, WorkspaceError> {
        let supplied = config
            .cwd
            .as_ref()
            .map(|p| (p, DirectorySource::Explicit))
            .or_else(|| {
                config
                    .env_cwd
                    .as_ref()
                    .map(|p| (p, DirectorySource::Environment))
            });

        if let Some((path, source)) = supplied {
            if !path.exists() {
                return Err(ConfigurationError {
                    path: path.clone(),
                    origin: source,
                }
                .into());
            }
            debug!(path = %path.display(), %source, "using supplied working directory");
            return Ok(Self {
                cwd: path.clone(),
                source,
                temp_dir: None,
            });
        }

        let temp_dir = create_temp_workspace(&config.temp_root)?;
        info!(path = %temp_dir.display(), "created temporary workspace");
        Ok(Self {
            cwd: temp_dir.clone(),
            source: DirectorySource::Temporary,
            temp_dir: Some(temp_dir),
        })
    }

    /// The resolved working directory
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The temporary workspace, if this resolver created one
    #[must_use]
    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    /// Returns true if the working directory is a temporary workspace owned by this resolver
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        self.temp_dir.is_some()
    }

    /// Which precedence step produced the working directory
    #[must_use]
    pub const fn source(&self) -> DirectorySource {
        self.source
    }

    /// Serializable snapshot of the resolution
    #[must_use]
    pub fn resolved(&self) -> ResolvedWorkingDirectory {
        ResolvedWorkingDirectory {
            path: self.cwd.clone(),
            is_temporary: self.is_temporary(),
            source: self.source,
        }
    }

    /// Remove the temporary workspace, if one was created.
    ///
    /// No-op for supplied directories. A workspace that is already gone
    /// counts as removed, so repeated calls succeed.
    pub fn cleanup(&self) -> Result<(), WorkspaceError> {
        let Some(temp_dir) = &self.temp_dir else {
            return Ok(());
        };

        match fs::remove_dir_all(temp_dir) {
            Ok(()) => {
                info!(path = %temp_dir.display(), "removed temporary workspace");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %temp_dir.display(), "temporary workspace already removed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Create a uniquely named workspace directory under `root` and detach it
/// from `tempfile`'s drop guard.
fn create_temp_workspace(root: &Path) -> io::Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir_in(root)?;
    Ok(dir.keep())
}
