//! Install planning.
//!
//! A [`Backend`] turns the state of a working directory into a
//! [`CommandPlan`] without touching the filesystem beyond probing it.
//! Both backends share the same gate ([`decide`]): no `package.json`, no
//! plan.
//!
//! - [`NpmBackend`] - primary backend, lockfile `npm-shrinkwrap.json`
//! - [`YarnBackend`] - used when `yarn.lock` exists; handles the offline mirror
//!
//! # Example
//!
//! ```
//! use depsupply::planner::{Backend, ManifestState, NpmBackend, Operation, PlanContext};
//!
//! let ctx = PlanContext::new("/build", "/cache");
//! let state = ManifestState { manifest_present: true, ..Default::default() };
//! let plan = NpmBackend.plan_for(&state, Operation::Install, &ctx);
//! assert_eq!(plan.steps[0].command_line(),
//!     "npm install --unsafe-perm --userconfig /build/.npmrc --cache /build/.npm");
//! ```

pub mod npm;
pub mod plan;
pub mod state;
pub mod yarn;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub use npm::NpmBackend;
pub use plan::{CommandPlan, FailurePolicy, MirrorConfig, Operation, PlanContext, PlannedCommand};
pub use state::{decide, Decision, ManifestState, Source, MANIFEST_FILE, OFFLINE_MIRROR_DIR};
pub use yarn::YarnBackend;

/// A package manager able to plan installs.
pub trait Backend {
    /// Program name, e.g. `npm`.
    fn name(&self) -> &'static str;

    /// Lockfile this backend pins dependencies with.
    fn lockfile_name(&self) -> &'static str;

    /// Commands for an operation that passed the gate.
    fn install_steps(
        &self,
        state: &ManifestState,
        source: Source,
        operation: Operation,
        ctx: &PlanContext,
    ) -> (Option<MirrorConfig>, Vec<PlannedCommand>);

    /// Plan from an already probed state.
    fn plan_for(&self, state: &ManifestState, operation: Operation, ctx: &PlanContext) -> CommandPlan {
        let decision = decide(state);
        let (mirror, steps) = match &decision {
            Decision::Skip { .. } => (None, Vec::new()),
            Decision::Install { source } => self.install_steps(state, *source, operation, ctx),
        };
        CommandPlan {
            backend: self.name(),
            operation,
            decision,
            mirror,
            steps,
        }
    }

    /// Probe the context's directories and plan.
    fn plan(&self, operation: Operation, ctx: &PlanContext) -> Result<CommandPlan> {
        let state = ManifestState::probe(&ctx.package_dir, &ctx.build_dir, self.lockfile_name())?;
        Ok(self.plan_for(&state, operation, ctx))
    }
}

/// Which backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `yarn` when `yarn.lock` exists, `npm` otherwise.
    #[default]
    Auto,
    Npm,
    Yarn,
}

/// Resolve `kind` against the build dir.
///
/// Only a `yarn.lock` at the build root selects yarn, even when the
/// manifest lives in a separate package dir.
pub fn select_backend(kind: BackendKind, build_dir: &Path) -> Box<dyn Backend> {
    match kind {
        BackendKind::Npm => Box::new(NpmBackend),
        BackendKind::Yarn => Box::new(YarnBackend),
        BackendKind::Auto => {
            if build_dir.join(yarn::YARN_LOCKFILE).is_file() {
                Box::new(YarnBackend)
            } else {
                Box::new(NpmBackend)
            }
        }
    }
}
