//! Workspace error types
//!
//! Two failure kinds exist: a supplied directory that is missing
//! (`ConfigurationError`) and OS-level filesystem failures, which are
//! passed through unchanged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::resolver::DirectorySource;

/// A user- or environment-supplied working directory does not exist.
#[derive(Debug, Error)]
#[error("{} does not exist", .path.display())]
pub struct ConfigurationError {
    /// The offending path, exactly as supplied
    pub path: PathBuf,
    /// Where the path came from
    pub origin: DirectorySource,
}

/// Errors raised while resolving or cleaning up a working directory
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Supplied directory failed validation
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Filesystem error from creating, scanning or removing a directory
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WorkspaceError {
    /// Returns true if this is a configuration error (missing supplied path)
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
