//! Error types for attachment operations.
//!
//! Application code (config loading, the CLI) works with [`anyhow`]; the
//! library surfaces [`FsalError`] so callers can tell a recoverable I/O
//! failure from an unrecoverable removal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or removing attachments.
#[derive(Debug, Error)]
pub enum FsalError {
    /// File metadata could not be read while building a descriptor.
    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying stat failure.
        #[source]
        source: io::Error,
    },

    /// Moving the file to the trash failed and hard deletion was not
    /// authorized. The file is untouched.
    #[error("Could not remove file {}: {source}", .path.display())]
    Remove {
        /// The file that could not be trashed.
        path: PathBuf,
        /// The trash failure.
        #[source]
        source: io::Error,
    },

    /// Neither trashing nor hard-deleting the file succeeded.
    ///
    /// The on-disk state no longer matches what the caller expects; this
    /// is never retried.
    #[error(
        "Could neither trash nor delete {} (trash: {trash_error}): {source}",
        .path.display()
    )]
    Unrecoverable {
        /// The file that could not be removed.
        path: PathBuf,
        /// Why the trash attempt failed.
        trash_error: io::Error,
        /// Why the subsequent hard delete failed.
        #[source]
        source: io::Error,
    },
}

impl FsalError {
    /// Returns `true` for removals that left the tree in an inconsistent state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FsalError::Unrecoverable { .. })
    }

    /// The path the failed operation was acting on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FsalError::Read { path, .. }
            | FsalError::Remove { path, .. }
            | FsalError::Unrecoverable { path, .. } => path,
        }
    }
}
