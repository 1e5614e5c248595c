//! Path identifiers.
//!
//! Every node in the tree is keyed by a hash of its absolute path, so the
//! same file gets the same identifier across sessions regardless of its
//! contents.

use sha2::{Digest, Sha256};
use std::path::Path;

/// SHA-256 of the path's string form, as lowercase hex.
pub fn path_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let p = Path::new("/docs/notes/photo.png");
        assert_eq!(path_hash(p), path_hash(p));
        assert_eq!(path_hash(p).len(), 64);
    }

    #[test]
    fn test_distinct_paths_differ() {
        assert_ne!(
            path_hash(Path::new("/docs/notes/photo.png")),
            path_hash(Path::new("/docs/notes/photo.jpg"))
        );
    }
}
