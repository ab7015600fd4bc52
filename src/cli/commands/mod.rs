//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`], which loads the configuration once and overlays
//! the command's flags onto it.

pub mod completions;
pub mod dispatcher;
pub mod fingerprint;
pub mod install;
pub mod plan;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
