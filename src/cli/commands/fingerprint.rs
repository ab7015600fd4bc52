//! The `fingerprint` command.

use std::path::{Path, PathBuf};

use crate::cli::args::FingerprintArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::snapshot::fingerprint_dir;

use super::dispatcher::{Command, CommandResult};

/// Prints the content fingerprint of the build dir.
pub struct FingerprintCommand {
    project_root: PathBuf,
    settings: Settings,
    args: FingerprintArgs,
}

impl FingerprintCommand {
    pub fn new(project_root: &Path, settings: Settings, args: FingerprintArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings,
            args,
        }
    }
}

impl Command for FingerprintCommand {
    fn execute(&self) -> Result<CommandResult> {
        let excluded = self
            .args
            .exclude
            .as_deref()
            .unwrap_or(&self.settings.excluded_prefix);
        println!("{}", fingerprint_dir(&self.project_root, excluded)?);
        Ok(CommandResult::success())
    }
}
