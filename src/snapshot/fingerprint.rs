//! Content fingerprints of a directory tree.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::walk::{walk, ExcludedPrefix, WalkEntry};
use crate::error::{Result, SupplyError};

/// Compute the fingerprint of `root`, skipping everything under `excluded_prefix`.
///
/// Every regular file contributes its relative path followed by its raw
/// content to a single SHA-256 digest, in walk order. Directories only affect
/// which files are visited; symlinks and special files are skipped. The
/// result is lowercase hex.
///
/// # Errors
///
/// Returns [`SupplyError::Traversal`] if any directory or file cannot be read.
/// A partial digest is never returned.
pub fn fingerprint_dir(root: &Path, excluded_prefix: &str) -> Result<String> {
    fingerprint_tree(root, &ExcludedPrefix::new(excluded_prefix))
}

pub(crate) fn fingerprint_tree(root: &Path, excluded: &ExcludedPrefix) -> Result<String> {
    let mut hasher = Sha256::new();

    walk(root, excluded, &mut |entry: &WalkEntry| {
        if !entry.metadata.file_type().is_file() {
            return Ok(());
        }
        hasher.update(entry.relative.as_encoded_bytes());
        hash_file_content(&mut hasher, &entry.path)
    })?;

    let digest = hasher.finalize();
    Ok(hex::encode(&digest[..]))
}

fn hash_file_content(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| SupplyError::traversal(path, e))?;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let read = file
            .read(&mut buf)
            .map_err(|e| SupplyError::traversal(path, e))?;
        if read == 0 {
            return Ok(());
        }
        hasher.update(&buf[..read]);
    }
}
