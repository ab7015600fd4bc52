//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, Settings};
use crate::error::Result;
use crate::planner::Operation;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] carrying the exit code.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
///
/// Failures surface as `Err`; a result only carries the exit code.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given build dir.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_path: None,
        }
    }

    /// Use an explicit config file instead of `.depsupply/config.yml`.
    pub fn with_config(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Get the build dir path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn settings(&self) -> Result<Settings> {
        Ok(load_config(&self.project_root, self.config_path.as_deref())?.settings)
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install(args) => {
                let settings = args.apply(self.settings()?);
                super::install::InstallCommand::new(&self.project_root, settings, Operation::Install)
                    .execute()
            }
            Commands::Rebuild(args) => {
                let settings = args.apply(self.settings()?);
                super::install::InstallCommand::new(&self.project_root, settings, Operation::Rebuild)
                    .execute()
            }
            Commands::Plan(args) => {
                let settings = args.install.apply(self.settings()?);
                super::plan::PlanCommand::new(&self.project_root, settings, args.clone()).execute()
            }
            Commands::Fingerprint(args) => {
                let settings = self.settings()?;
                super::fingerprint::FingerprintCommand::new(&self.project_root, settings, args.clone())
                    .execute()
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute()
            }
        }
    }
}
