//! Point-in-time reference markers.

use chrono::{DateTime, Utc};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// A temporary file whose modification time marks "now".
///
/// Entries modified strictly after the marker are considered changed. The
/// file is removed when the marker is dropped.
#[derive(Debug)]
pub struct ReferenceMarker {
    file: NamedTempFile,
    modified: SystemTime,
}

impl ReferenceMarker {
    /// Create a marker in the system temp directory.
    pub fn create() -> io::Result<Self> {
        Self::from_file(tempfile::Builder::new().prefix("depsupply-marker-").tempfile()?)
    }

    /// Create a marker in `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        Self::from_file(
            tempfile::Builder::new()
                .prefix("depsupply-marker-")
                .tempfile_in(dir)?,
        )
    }

    fn from_file(file: NamedTempFile) -> io::Result<Self> {
        // Read back from the filesystem so comparisons use the same clock
        // and granularity as the entries being checked.
        let modified = file.as_file().metadata()?.modified()?;
        Ok(Self { file, modified })
    }

    /// Location of the marker file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Modification time of the marker.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Marker time as UTC, for logging.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from(self.modified)
    }

    /// Whether `mtime` is strictly after the marker.
    pub fn is_older_than(&self, mtime: SystemTime) -> bool {
        mtime > self.modified
    }
}
