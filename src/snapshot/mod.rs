//! Build directory change detection.
//!
//! A [`DirectorySnapshot`] is taken at the start of the dependency phase and
//! finished once it is over. It offers two independent diagnostics:
//!
//! - a content fingerprint (SHA-256 over relative paths and file bytes),
//!   computed before and after
//! - a change report listing entries whose modification time is newer than a
//!   [`ReferenceMarker`] created with the snapshot
//!
//! Both skip a single excluded prefix, normally the tool's own state dir.
//!
//! # Example
//!
//! ```
//! use depsupply::snapshot::DirectorySnapshot;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("package.json"), "{}").unwrap();
//!
//! let snapshot = DirectorySnapshot::begin(temp.path(), ".depsupply", None).unwrap();
//! let report = snapshot.finish().unwrap();
//! assert!(report.is_unchanged());
//! ```

pub mod fingerprint;
pub mod marker;
pub mod walk;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SupplyError};

pub use fingerprint::fingerprint_dir;
pub use marker::ReferenceMarker;
pub use walk::ExcludedPrefix;

/// Fingerprints of a build dir taken around the dependency phase.
#[derive(Debug)]
pub struct DirectorySnapshot {
    root: PathBuf,
    excluded: ExcludedPrefix,
    marker: Option<ReferenceMarker>,
    before: Option<String>,
}

/// Outcome of a finished snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotReport {
    /// Fingerprint taken by [`DirectorySnapshot::begin`], if any.
    pub before: Option<String>,
    /// Fingerprint taken by [`DirectorySnapshot::finish`].
    pub after: String,
    /// Entries modified after the reference marker.
    pub changed: Vec<String>,
}

impl SnapshotReport {
    /// Whether the before and after fingerprints agree.
    pub fn is_unchanged(&self) -> bool {
        self.before.as_deref() == Some(self.after.as_str())
    }
}

impl DirectorySnapshot {
    /// Start a snapshot of `root` with a marker in the system temp dir.
    ///
    /// Failure to create the marker is not an error: fingerprints keep
    /// working and the change report comes back empty.
    pub fn new(root: impl Into<PathBuf>, excluded_prefix: &str) -> Self {
        Self::with_marker(root.into(), excluded_prefix, ReferenceMarker::create())
    }

    /// Start a snapshot with the marker created in `marker_dir`.
    pub fn new_in(root: impl Into<PathBuf>, excluded_prefix: &str, marker_dir: &Path) -> Self {
        Self::with_marker(
            root.into(),
            excluded_prefix,
            ReferenceMarker::create_in(marker_dir),
        )
    }

    fn with_marker(
        root: PathBuf,
        excluded_prefix: &str,
        marker: std::io::Result<ReferenceMarker>,
    ) -> Self {
        let marker = match marker {
            Ok(marker) => {
                debug!(
                    "Reference marker {} at {}",
                    marker.path().display(),
                    marker.created_at()
                );
                Some(marker)
            }
            Err(e) => {
                debug!("Change report unavailable, could not create marker: {}", e);
                None
            }
        };

        Self {
            root,
            excluded: ExcludedPrefix::new(excluded_prefix),
            marker,
            before: None,
        }
    }

    /// Start a snapshot and record the "before" fingerprint.
    pub fn begin(
        root: impl Into<PathBuf>,
        excluded_prefix: &str,
        marker_dir: Option<&Path>,
    ) -> Result<Self> {
        let mut snapshot = match marker_dir {
            Some(dir) => Self::new_in(root, excluded_prefix, dir),
            None => Self::new(root, excluded_prefix),
        };
        let sum = snapshot.fingerprint()?;
        debug!("Build dir checksum before install: {}", sum);
        snapshot.before = Some(sum);
        Ok(snapshot)
    }

    /// Root being observed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Excluded prefix in normalized form.
    pub fn excluded_prefix(&self) -> &str {
        self.excluded.as_str()
    }

    /// Whether a change report can be produced.
    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// Fingerprint recorded by [`DirectorySnapshot::begin`].
    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    /// Current fingerprint of the root.
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint::fingerprint_tree(&self.root, &self.excluded)
    }

    /// Entries (files and directories) modified after the marker, sorted.
    ///
    /// Based on modification times only; intended for diagnostics. Empty
    /// when no marker could be created.
    pub fn changed_paths(&self) -> Result<Vec<String>> {
        let Some(marker) = &self.marker else {
            return Ok(Vec::new());
        };

        let mut changed = Vec::new();
        walk::walk(&self.root, &self.excluded, &mut |entry: &walk::WalkEntry| {
            let mtime = entry
                .metadata
                .modified()
                .map_err(|e| SupplyError::traversal(&entry.path, e))?;
            if marker.is_older_than(mtime) {
                changed.push(entry.display_relative());
            }
            Ok(())
        })?;
        changed.sort();
        Ok(changed)
    }

    /// Take the "after" fingerprint and the change report, then release the marker.
    pub fn finish(self) -> Result<SnapshotReport> {
        let after = self.fingerprint()?;
        debug!("Build dir checksum after install: {}", after);

        let changed = self.changed_paths()?;
        if !changed.is_empty() {
            debug!("Below files changed:");
            for path in &changed {
                debug!("{}", path);
            }
        }

        Ok(SnapshotReport {
            before: self.before.clone(),
            after,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    const HI_DIGEST: &str = "cbe0528fa2aaa63a52301c39c3cfb77f08d434111582b2086e3c175c34501190";
    const BYE_DIGEST: &str = "bfe10932ff5e08c8ef33e23b260f7c9686d3321b84f9051a9c83a960bb9c9ed8";

    fn build_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("a/b/file"), "hi").unwrap();
        temp
    }

    fn begin(temp: &TempDir) -> DirectorySnapshot {
        let snapshot = DirectorySnapshot::begin(temp.path(), ".depsupply", None).unwrap();
        thread::sleep(Duration::from_millis(10));
        snapshot
    }

    #[test]
    fn begin_records_before_fingerprint() {
        let temp = build_dir();
        let snapshot = DirectorySnapshot::begin(temp.path(), ".depsupply", None).unwrap();
        assert_eq!(snapshot.before(), Some(HI_DIGEST));
        assert!(snapshot.has_marker());
    }

    #[test]
    fn unchanged_dir_reports_nothing() {
        let temp = build_dir();
        let snapshot = begin(&temp);

        let report = snapshot.finish().unwrap();

        assert_eq!(report.after, HI_DIGEST);
        assert!(report.is_unchanged());
        assert!(report.changed.is_empty());
    }

    #[test]
    fn modified_file_is_reported() {
        let temp = build_dir();
        let snapshot = begin(&temp);

        fs::write(temp.path().join("a/b/file"), "bye").unwrap();
        let report = snapshot.finish().unwrap();

        assert_eq!(report.after, BYE_DIGEST);
        assert!(!report.is_unchanged());
        assert_eq!(report.changed, vec!["a/b/file"]);
    }

    #[test]
    fn added_file_reports_file_and_parent() {
        let temp = build_dir();
        let snapshot = begin(&temp);

        fs::write(temp.path().join("a/file"), "new file").unwrap();
        let report = snapshot.finish().unwrap();

        assert_eq!(report.changed, vec!["a", "a/file"]);
    }

    #[test]
    fn excluded_prefix_not_reported() {
        let temp = build_dir();
        fs::create_dir_all(temp.path().join(".depsupply")).unwrap();
        let snapshot = begin(&temp);

        fs::write(temp.path().join(".depsupply/state"), "x").unwrap();
        let report = snapshot.finish().unwrap();

        assert!(report.is_unchanged());
        assert!(report.changed.is_empty());
    }

    #[test]
    fn missing_marker_degrades_to_empty_report() {
        let temp = build_dir();
        let snapshot =
            DirectorySnapshot::new_in(temp.path(), ".depsupply", &temp.path().join("missing"));
        assert!(!snapshot.has_marker());
        thread::sleep(Duration::from_millis(10));

        fs::write(temp.path().join("a/b/file"), "bye").unwrap();
        let report = snapshot.finish().unwrap();

        assert_eq!(report.before, None);
        assert_eq!(report.after, BYE_DIGEST);
        assert!(report.changed.is_empty());
    }

    #[test]
    fn marker_released_after_finish() {
        let temp = build_dir();
        let markers = TempDir::new().unwrap();
        let snapshot =
            DirectorySnapshot::begin(temp.path(), ".depsupply", Some(markers.path())).unwrap();
        assert_eq!(fs::read_dir(markers.path()).unwrap().count(), 1);

        snapshot.finish().unwrap();

        assert_eq!(fs::read_dir(markers.path()).unwrap().count(), 0);
    }

    #[test]
    fn marker_released_when_finish_fails() {
        let temp = build_dir();
        let markers = TempDir::new().unwrap();
        let snapshot =
            DirectorySnapshot::begin(temp.path(), ".depsupply", Some(markers.path())).unwrap();

        fs::remove_dir_all(temp.path()).unwrap();
        assert!(snapshot.finish().is_err());

        assert_eq!(fs::read_dir(markers.path()).unwrap().count(), 0);
    }

    #[test]
    fn begin_fails_on_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = DirectorySnapshot::begin(temp.path().join("nope"), ".depsupply", None);
        assert!(matches!(result, Err(SupplyError::Traversal { .. })));
    }
}
