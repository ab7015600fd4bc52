//! depsupply - Node.js dependency installation for build pipelines.
//!
//! Given a build directory, depsupply decides whether and how to install
//! node modules with npm or yarn, runs the resulting commands, and reports
//! whether the build directory changed while doing so.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading
//! - [`error`] - Error types and result aliases
//! - [`exec`] - Running command plans
//! - [`planner`] - Install decisions and command plans for npm and yarn
//! - [`snapshot`] - Build dir fingerprints and change reports
//! - [`supply`] - The dependency phase, end to end
//!
//! # Example
//!
//! ```
//! use depsupply::exec::RecordingRunner;
//! use depsupply::planner::Operation;
//! use depsupply::supply::Supplier;
//! use depsupply::config::Settings;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let build = TempDir::new().unwrap();
//! fs::write(build.path().join("package.json"), "{}").unwrap();
//!
//! let mut runner = RecordingRunner::new();
//! let outcome = Supplier::new(build.path(), &Settings::default())
//!     .run(Operation::Install, &mut runner)
//!     .unwrap();
//! assert_eq!(outcome.plan.backend, "npm");
//! assert_eq!(runner.ran().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod planner;
pub mod snapshot;
pub mod supply;

pub use error::{Result, SupplyError};
