//! Running planned commands as child processes.

use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::debug;

use crate::error::{Result, SupplyError};
use crate::planner::PlannedCommand;

/// How a command that could be started ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Exit code 0.
    Success,
    /// Non-zero exit (None if killed by signal).
    Exited { code: Option<i32> },
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Executes one planned command.
///
/// An ordinary unsuccessful exit is reported as [`RunStatus::Exited`]; only
/// failures to run the program at all are errors.
pub trait CommandRunner {
    fn run(&mut self, command: &PlannedCommand) -> Result<RunStatus>;
}

/// Runs commands as child processes with inherited stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &PlannedCommand) -> Result<RunStatus> {
        let start = Instant::now();
        debug!("Running {} in {}", command.command_line(), command.dir.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.dir)
            .envs(&command.env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| SupplyError::Spawn {
                command: command.command_line(),
                source,
            })?;

        debug!(
            "{} finished in {:?} with {}",
            command.program,
            start.elapsed(),
            status
        );

        if status.success() {
            Ok(RunStatus::Success)
        } else {
            Ok(RunStatus::Exited {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str, dir: &std::path::Path) -> PlannedCommand {
        PlannedCommand::new("sh", dir).args(["-c", script])
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let temp = TempDir::new().unwrap();
        let status = ProcessRunner.run(&sh("exit 0", temp.path())).unwrap();
        assert_eq!(status, RunStatus::Success);
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let status = ProcessRunner.run(&sh("exit 3", temp.path())).unwrap();
        assert_eq!(status, RunStatus::Exited { code: Some(3) });
        assert!(!status.success());
    }

    #[cfg(unix)]
    #[test]
    fn env_overlay_and_dir_are_applied() {
        let temp = TempDir::new().unwrap();
        let cmd = sh("test \"$MY_VAR\" = my_value && test -f marker", temp.path())
            .env("MY_VAR", "my_value");
        std::fs::write(temp.path().join("marker"), "").unwrap();

        assert!(ProcessRunner.run(&cmd).unwrap().success());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let cmd = PlannedCommand::new("depsupply-no-such-program", temp.path());

        let result = ProcessRunner.run(&cmd);

        assert!(matches!(result, Err(SupplyError::Spawn { .. })));
    }
}
