//! Attachment descriptors: build, project, and refresh.
//!
//! Attachments are the non-document files of a directory (images, PDFs,
//! binaries). This module turns a path on disk into an
//! [`AttachmentDescriptor`], derives the flat [`AttachmentMetadata`] sent
//! to consumers that cannot hold live references, and refreshes the
//! volatile stat fields when a watcher reports the file changed.
//!
//! Metadata is read with `lstat` semantics: a symlink is described as the
//! link itself, not its target.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use crate::directory::DirectoryNode;
use crate::error::FsalError;
use crate::hash::path_hash;
use crate::models::{AttachmentDescriptor, AttachmentMetadata, FileType};

/// The volatile part of a descriptor.
struct FileStat {
    size: u64,
    modtime: i64,
    creationtime: i64,
}

async fn stat(path: &Path) -> io::Result<FileStat> {
    let meta = tokio::fs::symlink_metadata(path).await?;
    Ok(FileStat {
        size: meta.len(),
        modtime: to_millis(meta.modified()?),
        creationtime: meta.created().map(to_millis).unwrap_or(0),
    })
}

fn to_millis(t: SystemTime) -> i64 {
    DateTime::<Utc>::from(t).timestamp_millis()
}

/// `.png` for `photo.png`, empty for `Makefile` and `.bashrc`.
fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Builds a descriptor for the file at `path`, owned by `parent`.
///
/// `path` should be absolute; the identifier is derived from it verbatim.
/// Fails with [`FsalError::Read`] if the file cannot be stat'ed.
pub async fn build(
    path: &Path,
    parent: &Arc<DirectoryNode>,
) -> Result<AttachmentDescriptor, FsalError> {
    let st = stat(path).await.map_err(|source| FsalError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    debug!(path = %path.display(), size = st.size, "parsed attachment");

    Ok(AttachmentDescriptor {
        parent: Arc::downgrade(parent),
        path: path.to_path_buf(),
        name,
        hash: path_hash(path),
        ext: extension(path),
        size: st.size,
        dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        modtime: st.modtime,
        creationtime: st.creationtime,
        file_type: FileType::Other,
    })
}

/// Flat snapshot of `attachment` with the parent replaced by its hash.
pub fn metadata(attachment: &AttachmentDescriptor) -> AttachmentMetadata {
    AttachmentMetadata {
        parent: attachment.parent().map(|p| p.hash.clone()),
        path: attachment.path.clone(),
        name: attachment.name.clone(),
        hash: attachment.hash.clone(),
        ext: attachment.ext.clone(),
        size: attachment.size,
        file_type: attachment.file_type,
        modtime: attachment.modtime,
        creationtime: attachment.creationtime,
        dir: attachment.dir.clone(),
    }
}

/// Re-reads size and timestamps after the file changed on disk.
///
/// Identity fields are never touched. Stat errors are returned as-is so the
/// caller can decide whether `NotFound` means the file was deleted.
pub async fn reparse(attachment: &mut AttachmentDescriptor) -> io::Result<()> {
    let st = stat(&attachment.path).await?;
    attachment.modtime = st.modtime;
    attachment.creationtime = st.creationtime;
    attachment.size = st.size;
    debug!(path = %attachment.path.display(), size = st.size, "reparsed attachment");
    Ok(())
}

/// Builds every path as an attachment of a node for its directory.
///
/// Paths sharing a directory share one node, so sibling order follows
/// argument order.
pub async fn inspect_paths(paths: &[PathBuf]) -> Result<Vec<AttachmentMetadata>> {
    let mut nodes: BTreeMap<PathBuf, Arc<DirectoryNode>> = BTreeMap::new();
    let mut out = Vec::with_capacity(paths.len());

    for path in paths {
        let abs = std::path::absolute(path)?;
        let dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();
        let node = nodes
            .entry(dir.clone())
            .or_insert_with(|| DirectoryNode::new(dir));
        let handle = node.attach(&abs).await?;
        let descriptor = handle.read().await;
        out.push(metadata(&descriptor));
    }

    Ok(out)
}

/// CLI entry point — prints one block per attachment, or JSON.
pub async fn run_inspect(paths: &[PathBuf], json: bool) -> Result<()> {
    let items = inspect_paths(paths).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        println!("--- {} ---", item.name);
        println!("path:     {}", item.path.display());
        println!("hash:     {}", item.hash);
        println!("parent:   {}", item.parent.as_deref().unwrap_or("(none)"));
        let ext = if item.ext.is_empty() {
            "(none)"
        } else {
            item.ext.as_str()
        };
        println!("ext:      {}", ext);
        println!("size:     {} bytes", item.size);
        println!("modified: {}", format_ms_iso(item.modtime));
        println!("created:  {}", format_created(item.creationtime));
        println!();
    }

    Ok(())
}

/// `0` means the filesystem reported no birth time.
fn format_created(ms: i64) -> String {
    if ms == 0 {
        return "(unknown)".to_string();
    }
    format_ms_iso(ms)
}

fn format_ms_iso(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extension() {
        assert_eq!(extension(Path::new("/docs/notes/photo.png")), ".png");
        assert_eq!(extension(Path::new("/docs/archive.tar.gz")), ".gz");
        assert_eq!(extension(Path::new("/docs/Makefile")), "");
        assert_eq!(extension(Path::new("/home/me/.bashrc")), "");
        assert_eq!(extension(Path::new("/docs/file.")), ".");
    }

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(0), "(unknown)");
        assert_eq!(format_created(1_700_000_000_000), "2023-11-14T22:13:20Z");
    }

    #[tokio::test]
    async fn test_build_populates_descriptor() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        fs::write(&path, b"12345").unwrap();
        let node = DirectoryNode::new(tmp.path());

        let d = build(&path, &node).await.unwrap();
        assert_eq!(d.path, path);
        assert_eq!(d.name, "photo.png");
        assert_eq!(d.ext, ".png");
        assert_eq!(d.dir, tmp.path());
        assert_eq!(d.size, 5);
        assert_eq!(d.hash, path_hash(&path));
        assert_eq!(d.file_type, FileType::Other);
        assert!(d.modtime > 0);
        assert!(Arc::ptr_eq(&d.parent().unwrap(), &node));
    }

    #[tokio::test]
    async fn test_build_missing_file_wraps_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.png");
        let node = DirectoryNode::new(tmp.path());

        let err = build(&path, &node).await.unwrap_err();
        match &err {
            FsalError::Read { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing.png"));
    }

    #[tokio::test]
    async fn test_metadata_replaces_parent_with_hash() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.pdf");
        fs::write(&path, b"pdf").unwrap();
        let node = DirectoryNode::new(tmp.path());
        let d = build(&path, &node).await.unwrap();

        let meta = metadata(&d);
        assert_eq!(meta.parent.as_deref(), Some(node.hash.as_str()));
        assert_eq!(meta.hash, d.hash);
        assert_eq!(meta.size, d.size);
        assert_eq!(meta.modtime, d.modtime);
        assert_eq!(meta.dir, d.dir);

        let json = serde_json::to_value(&meta).unwrap();
        assert!(json["parent"].is_string());
    }

    #[tokio::test]
    async fn test_metadata_of_orphan_has_no_parent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scan.pdf");
        fs::write(&path, b"pdf").unwrap();
        let node = DirectoryNode::new(tmp.path());
        let d = build(&path, &node).await.unwrap();
        drop(node);

        assert_eq!(metadata(&d).parent, None);
    }

    #[tokio::test]
    async fn test_reparse_updates_only_volatile_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.bin");
        fs::write(&path, b"ab").unwrap();
        let node = DirectoryNode::new(tmp.path());
        let mut d = build(&path, &node).await.unwrap();
        let before = d.clone();

        fs::write(&path, b"abcdefgh").unwrap();
        reparse(&mut d).await.unwrap();

        assert_eq!(d.size, 8);
        assert_eq!(d.hash, before.hash);
        assert_eq!(d.path, before.path);
        assert_eq!(d.name, before.name);
        assert_eq!(d.ext, before.ext);
        assert!(Arc::ptr_eq(&d.parent().unwrap(), &node));

        // Idempotent for an unchanged file.
        let snapshot = metadata(&d);
        reparse(&mut d).await.unwrap();
        assert_eq!(metadata(&d), snapshot);
    }

    #[tokio::test]
    async fn test_reparse_missing_file_returns_raw_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.bin");
        fs::write(&path, b"ab").unwrap();
        let node = DirectoryNode::new(tmp.path());
        let mut d = build(&path, &node).await.unwrap();
        let before = metadata(&d);

        fs::remove_file(&path).unwrap();
        let err = reparse(&mut d).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(metadata(&d), before);
    }

    #[tokio::test]
    async fn test_inspect_paths_shares_directory_node() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.png"), b"a").unwrap();
        fs::write(tmp.path().join("b.png"), b"bb").unwrap();

        let items = inspect_paths(&[tmp.path().join("a.png"), tmp.path().join("b.png")])
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].parent, items[1].parent);
        assert_eq!(items[1].size, 2);
    }
}
