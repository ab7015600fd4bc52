//! Deterministic directory traversal.

use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use crate::error::{Result, SupplyError};

/// Relative path prefix that is never visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedPrefix(String);

impl ExcludedPrefix {
    /// Normalize a prefix such as `./.depsupply/` to `.depsupply`.
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_start_matches("./").trim_end_matches('/');
        Self(trimmed.replace('\\', "/"))
    }

    /// The normalized prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a `/`-separated relative path falls under the prefix.
    ///
    /// Compared byte-wise, so names that are not valid UTF-8 never match by
    /// accident.
    pub fn matches(&self, relative: impl AsRef<OsStr>) -> bool {
        let prefix = self.0.as_bytes();
        if prefix.is_empty() {
            return false;
        }
        let relative = relative.as_ref().as_encoded_bytes();
        relative == prefix
            || relative
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.first() == Some(&b'/'))
    }
}

/// An entry reached during a walk.
#[derive(Debug)]
pub struct WalkEntry {
    /// Path relative to the walk root, always `/`-separated.
    pub relative: OsString,
    /// Absolute path.
    pub path: PathBuf,
    /// Metadata of the entry itself (symlinks are not followed).
    pub metadata: Metadata,
}

impl WalkEntry {
    /// Relative path for display; invalid UTF-8 is replaced.
    pub fn display_relative(&self) -> String {
        self.relative.to_string_lossy().into_owned()
    }
}

/// Walk `root` depth-first, visiting the entries of each directory in file
/// name order. Excluded entries are pruned together with their subtree.
/// The root itself is not visited.
pub fn walk<F>(root: &Path, excluded: &ExcludedPrefix, visit: &mut F) -> Result<()>
where
    F: FnMut(&WalkEntry) -> Result<()>,
{
    walk_dir(root, OsStr::new(""), excluded, visit)
}

fn walk_dir<F>(
    dir: &Path,
    relative: &OsStr,
    excluded: &ExcludedPrefix,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&WalkEntry) -> Result<()>,
{
    let mut children = fs::read_dir(dir)
        .map_err(|e| SupplyError::traversal(dir, e))?
        .map(|entry| entry.map_err(|e| SupplyError::traversal(dir, e)))
        .collect::<Result<Vec<_>>>()?;
    children.sort_by_key(|entry| entry.file_name());

    for child in children {
        let name = child.file_name();
        let child_relative = if relative.is_empty() {
            name
        } else {
            let mut joined = relative.to_os_string();
            joined.push("/");
            joined.push(&name);
            joined
        };

        if excluded.matches(&child_relative) {
            continue;
        }

        let path = child.path();
        let metadata = fs::symlink_metadata(&path).map_err(|e| SupplyError::traversal(&path, e))?;
        let entry = WalkEntry {
            relative: child_relative,
            path,
            metadata,
        };
        visit(&entry)?;

        if entry.metadata.is_dir() {
            walk_dir(&entry.path, &entry.relative, excluded, visit)?;
        }
    }

    Ok(())
}
