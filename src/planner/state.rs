//! Manifest probing and the shared install gate.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{Result, SupplyError};

/// File declaring a project's dependencies.
pub const MANIFEST_FILE: &str = "package.json";

/// In-tree directory holding a pre-populated yarn offline mirror.
pub const OFFLINE_MIRROR_DIR: &str = "npm-packages-offline-cache";

/// What the working directory declares, probed fresh on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManifestState {
    pub manifest_present: bool,
    pub lockfile_present: bool,
    pub offline_mirror_present: bool,
}

impl ManifestState {
    /// Probe `package_dir` for the manifest and `lockfile_name`, and
    /// `build_dir` for the offline mirror.
    ///
    /// # Errors
    ///
    /// A missing file is not an error; any other stat failure is.
    pub fn probe(package_dir: &Path, build_dir: &Path, lockfile_name: &str) -> Result<Self> {
        Ok(Self {
            manifest_present: exists(&package_dir.join(MANIFEST_FILE))?,
            lockfile_present: exists(&package_dir.join(lockfile_name))?,
            offline_mirror_present: exists(&build_dir.join(OFFLINE_MIRROR_DIR))?,
        })
    }
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists()
        .map_err(|e| SupplyError::traversal(path, e))
}

/// Where the install's dependency list comes from. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    None,
    ManifestOnly,
    #[serde(rename = "manifest+lockfile")]
    ManifestAndLockfile,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ManifestOnly => "manifest-only",
            Self::ManifestAndLockfile => "manifest+lockfile",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether to act at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Decision {
    Skip { reason: String },
    Install { source: Source },
}

impl Decision {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip { .. })
    }

    pub fn source(&self) -> Source {
        match self {
            Self::Skip { .. } => Source::None,
            Self::Install { source } => *source,
        }
    }
}

/// The gate every backend goes through: skip iff there is no manifest.
pub fn decide(state: &ManifestState) -> Decision {
    if !state.manifest_present {
        Decision::Skip {
            reason: "no manifest".to_string(),
        }
    } else if state.lockfile_present {
        Decision::Install {
            source: Source::ManifestAndLockfile,
        }
    } else {
        Decision::Install {
            source: Source::ManifestOnly,
        }
    }
}
