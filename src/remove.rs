//! Attachment removal.
//!
//! A removal first tries the trash. If that fails and the caller allowed
//! it, the file is hard-deleted instead; a failure there is surfaced as
//! [`FsalError::Unrecoverable`] and nothing is detached. Only once the file
//! is confirmed gone is the descriptor spliced out of its parent's children.
//!
//! ```text
//! trash ──ok──────────────────────────▶ detach ──▶ done
//!   │                                      ▲
//!   └─err─┬─ delete_on_fail ─▶ delete ─ok──┘
//!         │                      └─err──▶ Unrecoverable
//!         └─ otherwise ─────────────────▶ Remove (file untouched)
//! ```

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Weak;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::directory::DirectoryNode;
use crate::error::FsalError;
use crate::models::SharedAttachment;
use crate::trash::{LocalTrash, Trash};

/// Removes the attachment's file and detaches it from its parent.
///
/// The descriptor lock is not held while the trash runs. Concurrent
/// operations on the same attachment must be serialized by the caller.
pub async fn remove(
    attachment: &SharedAttachment,
    trash: &dyn Trash,
    delete_on_fail: bool,
) -> Result<(), FsalError> {
    let (path, parent) = {
        let d = attachment.read().await;
        (d.path.clone(), d.parent())
    };

    let trashed = trash.trash_item(&path).await;
    if let Err(trash_error) = trashed {
        if !delete_on_fail {
            return Err(FsalError::Remove {
                path,
                source: trash_error,
            });
        }

        warn!(
            path = %path.display(),
            error = %trash_error,
            "could not move file to trash, deleting it"
        );
        let deleted = trash.delete_item(&path).await;
        if let Err(source) = deleted {
            error!(path = %path.display(), error = %source, "hard delete failed");
            return Err(FsalError::Unrecoverable {
                path,
                trash_error,
                source,
            });
        }
    }

    if let Some(parent) = parent {
        if parent.detach(attachment).await {
            attachment.write().await.parent = Weak::new();
        } else {
            debug!(
                path = %path.display(),
                parent = %parent.path.display(),
                "attachment was not listed in its parent"
            );
        }
    }

    Ok(())
}

/// CLI entry point — removes a single file through the configured trash.
pub async fn run_remove(config: &Config, path: &Path, delete_on_fail: bool) -> Result<()> {
    let trash_config = config
        .trash
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("trash.dir is not configured"))?;
    let trash = LocalTrash::new(&trash_config.dir);

    let abs = std::path::absolute(path)
        .with_context(|| format!("Invalid path: {}", path.display()))?;
    let dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();
    let node = DirectoryNode::new(dir);
    let handle = node.attach(&abs).await?;

    let delete_on_fail = delete_on_fail || config.removal.delete_on_fail;
    remove(&handle, &trash, delete_on_fail).await?;

    println!("Removed {}", abs.display());
    Ok(())
}
