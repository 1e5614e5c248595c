//! Trash backends.
//!
//! The removal coordinator never touches the filesystem directly; it goes
//! through a [`Trash`] so hosts can plug in the platform trash, and tests
//! can plug in one that fails on demand.
//!
//! [`LocalTrash`] implements the freedesktop.org layout:
//!
//! ```text
//! <root>/
//! ├── files/photo.png          trashed payload
//! └── info/photo.png.trashinfo original path + deletion date
//! ```

use async_trait::async_trait;
use chrono::Local;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Reversible and irreversible removal of a single file.
#[async_trait]
pub trait Trash: Send + Sync {
    /// Moves `path` somewhere it can be restored from.
    async fn trash_item(&self, path: &Path) -> io::Result<()>;

    /// Deletes `path` permanently.
    async fn delete_item(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

/// A freedesktop.org-style trash directory.
#[derive(Debug, Clone)]
pub struct LocalTrash {
    root: PathBuf,
}

/// Upper bound on ` N` suffixes tried for a colliding name.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

impl LocalTrash {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    pub fn info_dir(&self) -> PathBuf {
        self.root.join("info")
    }

    /// Claims a free name by creating its `.trashinfo` record.
    ///
    /// Returns the payload path inside `files/` and the info path.
    async fn reserve(&self, original: &Path) -> io::Result<(PathBuf, PathBuf)> {
        let file_name = original.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path has no file name: {}", original.display()),
            )
        })?;
        let base = file_name.to_string_lossy().to_string();
        let files = self.files_dir();
        let info = self.info_dir();

        for n in 1..=MAX_NAME_ATTEMPTS {
            let candidate = numbered_name(&base, n);
            let payload = files.join(&candidate);
            if tokio::fs::try_exists(&payload).await? {
                continue;
            }
            let info_path = info.join(format!("{}.trashinfo", candidate));
            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&info_path)
                .await
            {
                Ok(f) => f,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };
            file.write_all(trash_info(original).as_bytes()).await?;
            file.flush().await?;
            return Ok((payload, info_path));
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free trash name for {}", original.display()),
        ))
    }
}

#[async_trait]
impl Trash for LocalTrash {
    async fn trash_item(&self, path: &Path) -> io::Result<()> {
        // Missing files must fail before anything is written to the trash.
        tokio::fs::symlink_metadata(path).await?;
        tokio::fs::create_dir_all(self.files_dir()).await?;
        tokio::fs::create_dir_all(self.info_dir()).await?;

        let (payload, info_path) = self.reserve(path).await?;
        if let Err(e) = tokio::fs::rename(path, &payload).await {
            // Release the reservation; the file stays where it was.
            let _ = tokio::fs::remove_file(&info_path).await;
            return Err(e);
        }

        debug!(
            from = %path.display(),
            to = %payload.display(),
            "moved file to trash"
        );
        Ok(())
    }
}

/// `photo.png`, `photo 2.png`, `photo 3.png`, ...
fn numbered_name(base: &str, n: u32) -> String {
    if n == 1 {
        return base.to_string();
    }
    let p = Path::new(base);
    match (p.file_stem(), p.extension()) {
        (Some(stem), Some(ext)) => {
            format!("{} {}.{}", stem.to_string_lossy(), n, ext.to_string_lossy())
        }
        _ => format!("{} {}", base, n),
    }
}

fn trash_info(original: &Path) -> String {
    format!(
        "[Trash Info]\nPath={}\nDeletionDate={}\n",
        encode_path(original),
        Local::now().format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Percent-encodes a path for the `Path=` key (RFC 3986).
///
/// Leaves `/` and the unreserved characters `A-Z a-z 0-9 - _ . ~` as-is.
fn encode_path(path: &Path) -> String {
    let mut result = String::new();
    for &byte in path.as_os_str().as_encoded_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}
