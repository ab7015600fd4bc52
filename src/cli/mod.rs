//! Command-line interface for depsupply.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, FingerprintArgs, InstallArgs, PlanArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
