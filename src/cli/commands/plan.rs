//! The `plan` command: a dry run of `install` or `rebuild`.

use std::path::{Path, PathBuf};

use crate::cli::args::PlanArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::planner::{CommandPlan, Decision, FailurePolicy, Operation};
use crate::supply::Supplier;

use super::dispatcher::{Command, CommandResult};

/// Prints the command plan without executing it.
pub struct PlanCommand {
    project_root: PathBuf,
    settings: Settings,
    args: PlanArgs,
}

impl PlanCommand {
    pub fn new(project_root: &Path, settings: Settings, args: PlanArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            settings,
            args,
        }
    }

    fn operation(&self) -> Operation {
        if self.args.rebuild {
            Operation::Rebuild
        } else {
            Operation::Install
        }
    }
}

impl Command for PlanCommand {
    fn execute(&self) -> Result<CommandResult> {
        let supplier = Supplier::new(&self.project_root, &self.settings);
        let plan = supplier.plan(self.operation())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&plan).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            print!("{}", render(&plan));
        }
        Ok(CommandResult::success())
    }
}

/// Human-readable plan, one command per line.
fn render(plan: &CommandPlan) -> String {
    let mut out = String::new();
    match &plan.decision {
        Decision::Skip { reason } => {
            out.push_str(&format!("{}: skip ({})\n", plan.backend, reason));
            return out;
        }
        Decision::Install { source } => {
            out.push_str(&format!("{} {} ({})\n", plan.backend, plan.operation, source));
        }
    }

    if let Some(mirror) = &plan.mirror {
        let mode = if mirror.offline { "offline" } else { "online" };
        out.push_str(&format!("mode: {} (mirror {})\n", mode, mirror.mirror_dir.display()));
    }

    for (i, step) in plan.steps.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}", i + 1, step.command_line()));
        if let FailurePolicy::Warn { .. } = step.on_failure {
            out.push_str("  [warn on failure]");
        }
        out.push('\n');
    }
    out
}
