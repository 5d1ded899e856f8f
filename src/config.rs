//! Workspace configuration
//!
//! Collects the inputs for directory resolution in one place. The process
//! environment is read here and nowhere else, once, before a resolver is
//! built.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the default working directory
pub const CWD_ENV_VAR: &str = "CLAUDE_CWD";

/// Inputs for `DirectoryResolver::new`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Explicit working directory (highest precedence)
    pub cwd: Option<PathBuf>,
    /// Working directory taken from `CLAUDE_CWD`
    pub env_cwd: Option<PathBuf>,
    /// Parent directory for the fallback temporary workspace
    pub temp_root: PathBuf,
}

impl WorkspaceConfig {
    /// Config with only an explicit directory and no environment value.
    #[must_use]
    pub fn new(cwd: Option<PathBuf>) -> Self {
        Self {
            cwd: non_empty(cwd),
            env_cwd: None,
            temp_root: std::env::temp_dir(),
        }
    }

    /// Config with an explicit directory plus `CLAUDE_CWD` from the process environment.
    #[must_use]
    pub fn from_env(cwd: Option<PathBuf>) -> Self {
        Self::from_lookup(cwd, |key| std::env::var_os(key))
    }

    /// Like `from_env`, but reads variables through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(cwd: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Self {
            env_cwd: non_empty(lookup(CWD_ENV_VAR).map(PathBuf::from)),
            ..Self::new(cwd)
        }
    }

    /// Override the parent directory used for the fallback workspace
    #[must_use]
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}
