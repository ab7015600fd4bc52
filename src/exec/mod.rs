//! Executing command plans.
//!
//! Plans run strictly in order through a [`CommandRunner`]. The first step
//! that fails aborts the plan; nothing is retried or rolled back.

pub mod mock;
pub mod runner;

use tracing::{info, warn};

use crate::error::{Result, SupplyError};
use crate::planner::{CommandPlan, FailurePolicy};

pub use mock::{RecordingRunner, Scripted};
pub use runner::{CommandRunner, ProcessRunner, RunStatus};

/// Run every step of `plan`, fail-fast.
///
/// # Errors
///
/// - [`SupplyError::CommandFailed`] when an [`FailurePolicy::Abort`] step exits non-zero
/// - whatever the runner returns when a program cannot be started, for any step
pub fn execute_plan(plan: &CommandPlan, runner: &mut dyn CommandRunner) -> Result<()> {
    for step in &plan.steps {
        if let Some(description) = &step.description {
            info!("{}", description);
        }

        match runner.run(step)? {
            RunStatus::Success => {
                if let Some(message) = &step.on_success {
                    info!("{}", message);
                }
            }
            RunStatus::Exited { code } => match &step.on_failure {
                FailurePolicy::Abort => {
                    return Err(SupplyError::CommandFailed {
                        command: step.command_line(),
                        code,
                    });
                }
                FailurePolicy::Warn { message } => warn!("{}", message),
            },
        }
    }
    Ok(())
}
