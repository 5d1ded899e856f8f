//! Working directory management
//!
//! This module handles working directory resolution, the temporary
//! workspace lifecycle, and sweeping of leftover workspaces.

pub mod error;
pub mod resolver;
pub mod sweep;

pub use error::{ConfigurationError, WorkspaceError};
pub use resolver::{DirectoryResolver, DirectorySource, ResolvedWorkingDirectory, WORKSPACE_PREFIX};
pub use sweep::{
    find_workspaces, is_ephemeral_workspace, prune_workspaces, PruneReport, DEFAULT_MIN_AGE,
};
