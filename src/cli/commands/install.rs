//! The `install` and `rebuild` commands.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::exec::ProcessRunner;
use crate::planner::Operation;
use crate::supply::Supplier;

use super::dispatcher::{Command, CommandResult};

/// Runs the dependency phase against real package managers.
pub struct InstallCommand {
    project_root: PathBuf,
    settings: Settings,
    operation: Operation,
}

impl InstallCommand {
    pub fn new(project_root: &Path, settings: Settings, operation: Operation) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings,
            operation,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self) -> Result<CommandResult> {
        let supplier = Supplier::new(&self.project_root, &self.settings);
        let outcome = supplier.run(self.operation, &mut ProcessRunner)?;

        if !outcome.plan.is_skip() {
            info!(
                "Finished {} with {} ({} changed entries)",
                self.operation,
                outcome.plan.backend,
                outcome.report.changed.len()
            );
        }
        Ok(CommandResult::success())
    }
}
