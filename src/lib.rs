//! claude-workspace - Working directory resolution for Claude Code wrappers
//!
//! Decides which directory a wrapper runs the `claude` CLI in: an explicit
//! path, then `CLAUDE_CWD`, then a fresh temporary workspace that the
//! owner removes with an explicit cleanup call.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod logging;
pub mod workspace;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::{WorkspaceConfig, CWD_ENV_VAR};
pub use workspace::{
    ConfigurationError, DirectoryResolver, DirectorySource, PruneReport,
    ResolvedWorkingDirectory, WorkspaceError, WORKSPACE_PREFIX,
};
