//! yarn install plans.
//!
//! yarn keeps an offline mirror of package tarballs. If the build dir ships
//! one, installs run fully offline against it and the mirror is never
//! pruned. Otherwise the mirror lives in the cache dir, so it carries over
//! between builds, and yarn is free to prune it.

use super::plan::{MirrorConfig, Operation, PlanContext, PlannedCommand};
use super::state::{ManifestState, Source};
use super::Backend;

/// Lockfile pinning yarn dependencies.
pub const YARN_LOCKFILE: &str = "yarn.lock";

/// The alternate backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct YarnBackend;

impl YarnBackend {
    fn config_set(ctx: &PlanContext, key: &str, value: impl Into<String>) -> PlannedCommand {
        PlannedCommand::new("yarn", &ctx.package_dir)
            .args(["config", "set", key])
            .arg(value)
    }
}

impl Backend for YarnBackend {
    fn name(&self) -> &'static str {
        "yarn"
    }

    fn lockfile_name(&self) -> &'static str {
        YARN_LOCKFILE
    }

    // yarn has no separate native rebuild step; both operations share one plan.
    fn install_steps(
        &self,
        state: &ManifestState,
        source: Source,
        _operation: Operation,
        ctx: &PlanContext,
    ) -> (Option<MirrorConfig>, Vec<PlannedCommand>) {
        let mirror = if state.offline_mirror_present {
            MirrorConfig::offline(&ctx.build_dir)
        } else {
            MirrorConfig::online(&ctx.cache_dir)
        };
        let cache_folder = ctx.cache_dir.join(".cache").join("yarn");
        let cache_folder = cache_folder.display().to_string();

        let mut install = PlannedCommand::new("yarn", &ctx.package_dir)
            .describe(format!("Installing node modules ({})", source))
            .args(["install", "--pure-lockfile", "--ignore-engines", "--cache-folder"])
            .arg(cache_folder.clone())
            .env("YARN_CACHE_FOLDER", cache_folder.clone());
        if let Some(node_home) = &ctx.node_home {
            install = install.env("npm_config_nodedir", node_home.display().to_string());
        }

        let mut check = PlannedCommand::new("yarn", &ctx.package_dir)
            .arg("check")
            .warn_on_failure("yarn.lock is outdated")
            .on_success("yarn.lock and package.json match");

        if mirror.offline {
            install = install.arg("--offline");
            check = check.arg("--offline");
        }

        let steps = vec![
            Self::config_set(ctx, "yarn-offline-mirror", mirror.mirror_dir.display().to_string()),
            Self::config_set(ctx, "yarn-offline-mirror-pruning", mirror.pruning.to_string()),
            Self::config_set(ctx, "cache-folder", cache_folder),
            PlannedCommand::new("yarn", &ctx.package_dir).args(["config", "list"]),
            PlannedCommand::new("yarn", &ctx.package_dir).args(["config", "current"]),
            install,
            check,
        ];

        (Some(mirror), steps)
    }
}
