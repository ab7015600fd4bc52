//! Library integration tests for snapshots, planning and execution.

use depsupply::config::Settings;
use depsupply::exec::{execute_plan, RecordingRunner, Scripted};
use depsupply::planner::{
    Backend, ManifestState, NpmBackend, Operation, PlanContext, Source, YarnBackend,
};
use depsupply::snapshot::{fingerprint_dir, DirectorySnapshot};
use depsupply::supply::Supplier;
use depsupply::SupplyError;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn snapshot_reports_modification_and_addition() {
    let build = TempDir::new().unwrap();
    fs::create_dir_all(build.path().join("a/b")).unwrap();
    fs::write(build.path().join("a/b/file"), "hi").unwrap();

    let snapshot = DirectorySnapshot::begin(build.path(), ".depsupply", None).unwrap();
    let before = snapshot.before().unwrap().to_string();
    thread::sleep(Duration::from_millis(10));

    fs::write(build.path().join("a/b/file"), "bye").unwrap();
    fs::write(build.path().join("a/file"), "new file").unwrap();
    let report = snapshot.finish().unwrap();

    assert_ne!(report.after, before);
    assert_eq!(report.changed, vec!["a", "a/b/file", "a/file"]);
}

#[test]
fn fingerprint_survives_repeated_runs() {
    let build = TempDir::new().unwrap();
    fs::write(build.path().join("package.json"), "{\"name\":\"app\"}").unwrap();
    fs::create_dir(build.path().join("node_modules")).unwrap();
    fs::write(build.path().join("node_modules/dep.js"), "module.exports = 1").unwrap();

    let sums: Vec<_> = (0..3)
        .map(|_| fingerprint_dir(build.path(), ".depsupply").unwrap())
        .collect();

    assert!(sums.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn gate_labels_for_each_manifest_combination() {
    let ctx = PlanContext::new("/build", "/cache");
    let cases = [
        (false, false, None),
        (true, false, Some(Source::ManifestOnly)),
        (true, true, Some(Source::ManifestAndLockfile)),
    ];

    for (manifest, lockfile, expected) in cases {
        let state = ManifestState {
            manifest_present: manifest,
            lockfile_present: lockfile,
            offline_mirror_present: false,
        };
        let plan = NpmBackend.plan_for(&state, Operation::Install, &ctx);
        match expected {
            None => assert!(plan.is_skip()),
            Some(source) => assert_eq!(plan.decision.source(), source),
        }
    }
}

#[test]
fn mirror_modes_are_exclusive() {
    let ctx = PlanContext::new("/build", "/cache");
    for mirror_present in [false, true] {
        let state = ManifestState {
            manifest_present: true,
            lockfile_present: true,
            offline_mirror_present: mirror_present,
        };
        let plan = YarnBackend.plan_for(&state, Operation::Install, &ctx);
        let mirror = plan.mirror.unwrap();

        assert_eq!(mirror.offline, mirror_present);
        assert_eq!(mirror.pruning, !mirror_present);
        for step in plan.steps.iter().filter(|s| matches!(s.args[0].as_str(), "install" | "check")) {
            assert_eq!(step.has_arg("--offline"), mirror_present);
        }
    }
}

#[test]
fn rebuild_failure_prevents_install() {
    let ctx = PlanContext::new("/build", "/cache").with_node_home("/node");
    let state = ManifestState {
        manifest_present: true,
        ..Default::default()
    };
    let plan = NpmBackend.plan_for(&state, Operation::Rebuild, &ctx);
    let mut runner = RecordingRunner::new();
    runner.script("npm rebuild --nodedir=/node", Scripted::Exit(1));

    let result = execute_plan(&plan, &mut runner);

    assert!(matches!(result, Err(SupplyError::CommandFailed { .. })));
    assert_eq!(runner.command_lines(), vec!["npm rebuild --nodedir=/node"]);
}

#[test]
fn supplier_runs_yarn_and_reports_changes() {
    let build = TempDir::new().unwrap();
    fs::write(build.path().join("package.json"), "{}").unwrap();
    fs::write(build.path().join("yarn.lock"), "").unwrap();
    let settings = Settings {
        cache_dir: Some(PathBuf::from("/cache")),
        ..Default::default()
    };
    let mut runner = RecordingRunner::new();

    let outcome = Supplier::new(build.path(), &settings)
        .run(Operation::Install, &mut runner)
        .unwrap();

    assert_eq!(outcome.plan.backend, "yarn");
    assert_eq!(runner.ran().len(), 7);
    assert!(outcome.report.is_unchanged());
    assert!(outcome.report.changed.is_empty());
}
