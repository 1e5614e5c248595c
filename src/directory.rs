//! Minimal owning-directory node.
//!
//! Tree scanning lives elsewhere; this node only carries what attachments
//! need from their parent: its identifier and an ordered children list that
//! owns the attachment handles.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::attachment;
use crate::error::FsalError;
use crate::hash::path_hash;
use crate::models::SharedAttachment;

#[derive(Debug)]
pub struct DirectoryNode {
    pub path: PathBuf,
    pub name: String,
    pub hash: String,
    children: RwLock<Vec<SharedAttachment>>,
}

impl DirectoryNode {
    /// Creates an empty node for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Arc<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let hash = path_hash(&path);
        Arc::new(Self {
            path,
            name,
            hash,
            children: RwLock::new(Vec::new()),
        })
    }

    /// Builds an attachment for `path` and appends it to the children.
    pub async fn attach(self: &Arc<Self>, path: &Path) -> Result<SharedAttachment, FsalError> {
        let descriptor = attachment::build(path, self).await?;
        let handle = Arc::new(RwLock::new(descriptor));
        self.push_child(Arc::clone(&handle)).await;
        Ok(handle)
    }

    pub async fn push_child(&self, child: SharedAttachment) {
        self.children.write().await.push(child);
    }

    /// Snapshot of the current children, in order.
    pub async fn children(&self) -> Vec<SharedAttachment> {
        self.children.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.children.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.children.read().await.is_empty()
    }

    /// Removes the first child that is the same handle as `child`.
    ///
    /// Returns `false` if it was not listed. Sibling order is preserved.
    pub async fn detach(&self, child: &SharedAttachment) -> bool {
        let mut children = self.children.write().await;
        match children.iter().position(|c| Arc::ptr_eq(c, child)) {
            Some(idx) => {
                children.remove(idx);
                true
            }
            None => false,
        }
    }
}
