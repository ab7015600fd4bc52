//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Settings;
use crate::planner::BackendKind;

/// depsupply - Node.js dependency installation for build pipelines.
#[derive(Debug, Parser)]
#[command(name = "depsupply")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .depsupply/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the build dir (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install node modules
    Install(InstallArgs),

    /// Rebuild native modules, then install any new ones
    Rebuild(InstallArgs),

    /// Show the commands an install would run
    Plan(PlanArgs),

    /// Print the fingerprint of the build dir
    Fingerprint(FingerprintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings shared by `install`, `rebuild` and `plan`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Package manager to use
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Cache dir that persists across builds
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Dir containing package.json, relative to the build dir
    #[arg(long, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Node.js installation used for native modules
    #[arg(long, env = "NODE_HOME", value_name = "DIR")]
    pub node_home: Option<PathBuf>,
}

impl InstallArgs {
    /// Overlay the flags that were given onto `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.package_dir {
            settings.package_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.node_home {
            settings.node_home = Some(dir.clone());
        }
        settings
    }
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub install: InstallArgs,

    /// Plan a rebuild instead of an install
    #[arg(long)]
    pub rebuild: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fingerprint` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FingerprintArgs {
    /// Relative prefix to leave out (defaults to the configured one)
    #[arg(long, value_name = "PREFIX")]
    pub exclude: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
