//! Command plans produced by the backends.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::state::{Decision, OFFLINE_MIRROR_DIR};

/// Requested dependency operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Fresh install.
    Install,
    /// Rebuild native modules, then install anything new.
    Rebuild,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Rebuild => write!(f, "rebuild"),
        }
    }
}

/// Explicit inputs to planning. Nothing is read from the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanContext {
    /// Build directory being supplied.
    pub build_dir: PathBuf,
    /// Directory holding `package.json`; usually the build dir.
    pub package_dir: PathBuf,
    /// Cache directory that persists across builds.
    pub cache_dir: PathBuf,
    /// Node.js installation used to compile native modules.
    pub node_home: Option<PathBuf>,
}

impl PlanContext {
    /// Context with the package dir equal to the build dir.
    pub fn new(build_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        let build_dir = build_dir.into();
        Self {
            package_dir: build_dir.clone(),
            build_dir,
            cache_dir: cache_dir.into(),
            node_home: None,
        }
    }

    pub fn with_package_dir(mut self, package_dir: impl Into<PathBuf>) -> Self {
        self.package_dir = package_dir.into();
        self
    }

    pub fn with_node_home(mut self, node_home: impl Into<PathBuf>) -> Self {
        self.node_home = Some(node_home.into());
        self
    }
}

/// Yarn offline mirror settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorConfig {
    /// Install without network access from an in-tree mirror.
    pub offline: bool,
    /// Value for `yarn-offline-mirror`.
    pub mirror_dir: PathBuf,
    /// Value for `yarn-offline-mirror-pruning`.
    pub pruning: bool,
}

impl MirrorConfig {
    /// Use the mirror shipped inside the build dir; never prune it.
    pub fn offline(build_dir: &Path) -> Self {
        Self {
            offline: true,
            mirror_dir: build_dir.join(OFFLINE_MIRROR_DIR),
            pruning: false,
        }
    }

    /// Keep the mirror in the external cache so it survives between builds.
    pub fn online(cache_dir: &Path) -> Self {
        Self {
            offline: false,
            mirror_dir: cache_dir.join(OFFLINE_MIRROR_DIR),
            pruning: true,
        }
    }
}

/// What a non-zero exit of a step means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the plan and report the failure.
    Abort,
    /// Log `message` as a warning and carry on.
    Warn { message: String },
}

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    /// Logged at info level before running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory.
    pub dir: PathBuf,
    /// Merged over the inherited environment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub on_failure: FailurePolicy,
    /// Logged at info level after a successful run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_success: Option<String>,
}

impl PlannedCommand {
    pub fn new(program: &str, dir: &Path) -> Self {
        Self {
            description: None,
            program: program.to_string(),
            args: Vec::new(),
            dir: dir.to_path_buf(),
            env: BTreeMap::new(),
            on_failure: FailurePolicy::Abort,
            on_success: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn warn_on_failure(mut self, message: impl Into<String>) -> Self {
        self.on_failure = FailurePolicy::Warn {
            message: message.into(),
        };
        self
    }

    pub fn on_success(mut self, message: impl Into<String>) -> Self {
        self.on_success = Some(message.into());
        self
    }

    /// Program and arguments joined with spaces, for messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

/// Ordered steps for one backend and operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPlan {
    pub backend: &'static str,
    pub operation: Operation,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<MirrorConfig>,
    pub steps: Vec<PlannedCommand>,
}

impl CommandPlan {
    pub fn is_skip(&self) -> bool {
        self.decision.is_skip()
    }

    /// Steps running `program` with `first_arg`, e.g. `("yarn", "install")`.
    pub fn steps_for<'a>(
        &'a self,
        program: &'a str,
        first_arg: &'a str,
    ) -> impl Iterator<Item = &'a PlannedCommand> + 'a {
        self.steps.iter().filter(move |step| {
            step.program == program && step.args.first().map(String::as_str) == Some(first_arg)
        })
    }
}
