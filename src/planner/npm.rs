//! npm install plans.

use super::plan::{MirrorConfig, Operation, PlanContext, PlannedCommand};
use super::state::{ManifestState, Source};
use super::Backend;

/// Lockfile pinning npm dependencies.
pub const NPM_LOCKFILE: &str = "npm-shrinkwrap.json";

/// The primary backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmBackend;

impl NpmBackend {
    fn install(ctx: &PlanContext, description: String) -> PlannedCommand {
        PlannedCommand::new("npm", &ctx.package_dir)
            .describe(description)
            .args(["install", "--unsafe-perm", "--userconfig"])
            .path_arg(&ctx.build_dir.join(".npmrc"))
    }
}

impl Backend for NpmBackend {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn lockfile_name(&self) -> &'static str {
        NPM_LOCKFILE
    }

    fn install_steps(
        &self,
        _state: &ManifestState,
        source: Source,
        operation: Operation,
        ctx: &PlanContext,
    ) -> (Option<MirrorConfig>, Vec<PlannedCommand>) {
        let steps = match operation {
            Operation::Install => vec![
                Self::install(ctx, format!("Installing node modules ({})", source))
                    .arg("--cache")
                    .path_arg(&ctx.build_dir.join(".npm")),
            ],
            Operation::Rebuild => {
                let mut rebuild = PlannedCommand::new("npm", &ctx.package_dir)
                    .describe("Rebuilding any native modules")
                    .arg("rebuild");
                if let Some(node_home) = &ctx.node_home {
                    rebuild = rebuild.arg(format!("--nodedir={}", node_home.display()));
                }
                vec![
                    rebuild,
                    Self::install(ctx, format!("Installing any new modules ({})", source)),
                ]
            }
        };
        (None, steps)
    }
}
