//! Core data models for attachment tracking.
//!
//! An [`AttachmentDescriptor`] is the live record the directory tree holds
//! for a non-document file. [`AttachmentMetadata`] is its flat, serializable
//! snapshot: the parent back-reference is replaced by the parent's hash so
//! the record can cross boundaries that cannot carry shared references.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Weak};
use tokio::sync::RwLock;

use crate::directory::DirectoryNode;

/// Kind tag carried by every file descriptor in the tree.
///
/// Attachments are always [`FileType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Other,
}

/// Live descriptor for one tracked non-document file.
#[derive(Debug, Clone)]
pub struct AttachmentDescriptor {
    /// Owning directory. Empty once the descriptor has been detached.
    pub parent: Weak<DirectoryNode>,
    pub path: PathBuf,
    pub name: String,
    /// Deterministic identifier derived from `path` alone.
    pub hash: String,
    /// Extension including the leading dot, or empty.
    pub ext: String,
    pub size: u64,
    pub dir: PathBuf,
    /// Milliseconds since the Unix epoch.
    pub modtime: i64,
    /// Milliseconds since the Unix epoch; `0` where the filesystem has no
    /// birth time.
    pub creationtime: i64,
    pub file_type: FileType,
}

impl AttachmentDescriptor {
    /// Upgrades the parent back-reference, if the descriptor is still attached.
    pub fn parent(&self) -> Option<Arc<DirectoryNode>> {
        self.parent.upgrade()
    }
}

/// Shared handle to a descriptor, as owned by a directory's children list.
pub type SharedAttachment = Arc<RwLock<AttachmentDescriptor>>;

/// Flat, acyclic snapshot of an [`AttachmentDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    /// Hash of the owning directory; `None` for a detached descriptor.
    pub parent: Option<String>,
    pub path: PathBuf,
    pub name: String,
    pub hash: String,
    pub ext: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub modtime: i64,
    pub creationtime: i64,
    pub dir: PathBuf,
}
