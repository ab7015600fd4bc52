//! The dependency phase of a build.
//!
//! [`Supplier`] wires the pieces together: snapshot the build dir, pick a
//! backend, plan, execute, then finish the snapshot.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::exec::{execute_plan, CommandRunner};
use crate::planner::{select_backend, BackendKind, CommandPlan, Decision, Operation, PlanContext};
use crate::snapshot::{DirectorySnapshot, SnapshotReport};

/// Result of a completed dependency phase.
#[derive(Debug)]
pub struct SupplyOutcome {
    pub plan: CommandPlan,
    pub report: SnapshotReport,
}

/// Runs the dependency phase for one build dir.
#[derive(Debug, Clone)]
pub struct Supplier {
    ctx: PlanContext,
    backend: BackendKind,
    excluded_prefix: String,
    marker_dir: Option<PathBuf>,
}

impl Supplier {
    pub fn new(build_dir: &Path, settings: &Settings) -> Self {
        Self {
            ctx: settings.plan_context(build_dir),
            backend: settings.backend,
            excluded_prefix: settings.excluded_prefix.clone(),
            marker_dir: settings.marker_dir.clone(),
        }
    }

    pub fn context(&self) -> &PlanContext {
        &self.ctx
    }

    /// Plan `operation` without running anything.
    pub fn plan(&self, operation: Operation) -> Result<CommandPlan> {
        let backend = select_backend(self.backend, &self.ctx.build_dir);
        backend.plan(operation, &self.ctx)
    }

    /// Snapshot, plan, execute and report.
    ///
    /// The snapshot is finished and logged even when a step fails, so the
    /// change report covers whatever the failed step left behind. A step
    /// failure takes precedence over a snapshot error.
    pub fn run(
        &self,
        operation: Operation,
        runner: &mut dyn CommandRunner,
    ) -> Result<SupplyOutcome> {
        let phase = self.run_phase(operation, runner)?;
        phase.executed?;
        Ok(SupplyOutcome {
            plan: phase.plan,
            report: phase.report?,
        })
    }

    fn run_phase(&self, operation: Operation, runner: &mut dyn CommandRunner) -> Result<Phase> {
        let snapshot = DirectorySnapshot::begin(
            &self.ctx.build_dir,
            &self.excluded_prefix,
            self.marker_dir.as_deref(),
        )?;

        let plan = self.plan(operation)?;
        log_plan(&plan);
        let executed = execute_plan(&plan, runner);

        Ok(Phase {
            plan,
            executed,
            report: snapshot.finish(),
        })
    }
}

struct Phase {
    plan: CommandPlan,
    executed: Result<()>,
    report: Result<SnapshotReport>,
}

fn log_plan(plan: &CommandPlan) {
    if let Decision::Skip { reason } = &plan.decision {
        info!("Skipping {} ({})", plan.operation, reason);
        return;
    }

    if let Some(mirror) = &plan.mirror {
        if mirror.offline {
            info!("Found {} mirror directory {}", plan.backend, mirror.mirror_dir.display());
            info!("Running {} in offline mode", plan.backend);
        } else {
            info!("Running {} in online mode", plan.backend);
            info!("To run yarn in offline mode, see: https://yarnpkg.com/blog/2016/11/24/offline-mirror");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{RecordingRunner, Scripted};
    use crate::error::SupplyError;
    use std::fs;
    use tempfile::TempDir;

    fn settings(markers: &TempDir) -> Settings {
        Settings {
            cache_dir: Some(PathBuf::from("/cache")),
            node_home: Some(PathBuf::from("/node")),
            marker_dir: Some(markers.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn no_manifest_skips_without_running() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        let supplier = Supplier::new(build.path(), &settings(&markers));
        let mut runner = RecordingRunner::new();

        let outcome = supplier.run(Operation::Install, &mut runner).unwrap();

        assert!(outcome.plan.is_skip());
        assert!(runner.ran().is_empty());
        assert!(outcome.report.is_unchanged());
    }

    #[test]
    fn npm_selected_without_yarn_lock() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        fs::write(build.path().join("package.json"), "{}").unwrap();
        let supplier = Supplier::new(build.path(), &settings(&markers));
        let mut runner = RecordingRunner::new();

        let outcome = supplier.run(Operation::Install, &mut runner).unwrap();

        assert_eq!(outcome.plan.backend, "npm");
        assert_eq!(runner.ran().len(), 1);
    }

    #[test]
    fn yarn_offline_mode_when_mirror_shipped() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        fs::write(build.path().join("package.json"), "{}").unwrap();
        fs::write(build.path().join("yarn.lock"), "").unwrap();
        fs::create_dir(build.path().join("npm-packages-offline-cache")).unwrap();
        let supplier = Supplier::new(build.path(), &settings(&markers));

        let plan = supplier.plan(Operation::Install).unwrap();

        assert_eq!(plan.backend, "yarn");
        assert!(plan.mirror.unwrap().offline);
    }

    #[test]
    fn failure_propagates_and_releases_marker() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        fs::write(build.path().join("package.json"), "{}").unwrap();
        let supplier = Supplier::new(build.path(), &settings(&markers));
        let mut runner = RecordingRunner::new();
        runner.script("npm rebuild --nodedir=/node", Scripted::Exit(1));

        let err = supplier.run(Operation::Rebuild, &mut runner).unwrap_err();

        assert!(matches!(err, SupplyError::CommandFailed { .. }));
        assert_eq!(runner.ran().len(), 1);
        assert_eq!(fs::read_dir(markers.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_step_still_produces_report() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        fs::write(build.path().join("package.json"), "{}").unwrap();
        let supplier = Supplier::new(build.path(), &settings(&markers));
        let mut runner = RecordingRunner::new();
        runner.script("npm rebuild --nodedir=/node", Scripted::Exit(1));

        let phase = supplier.run_phase(Operation::Rebuild, &mut runner).unwrap();

        assert!(matches!(phase.executed, Err(SupplyError::CommandFailed { .. })));
        let report = phase.report.unwrap();
        assert!(report.before.is_some());
        assert!(report.is_unchanged());
        assert_eq!(fs::read_dir(markers.path()).unwrap().count(), 0);
    }

    #[test]
    fn root_yarn_lock_selects_yarn_for_package_dir() {
        let build = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        fs::create_dir(build.path().join("app")).unwrap();
        fs::write(build.path().join("app/package.json"), "{}").unwrap();
        fs::write(build.path().join("yarn.lock"), "").unwrap();
        let settings = Settings {
            package_dir: Some(PathBuf::from("app")),
            ..settings(&markers)
        };

        let plan = Supplier::new(build.path(), &settings)
            .plan(Operation::Install)
            .unwrap();

        assert_eq!(plan.backend, "yarn");
        assert!(!plan.is_skip());
    }
}
