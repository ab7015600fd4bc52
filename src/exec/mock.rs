//! Scripted runner for testing.
//!
//! `RecordingRunner` implements [`CommandRunner`] without spawning anything.
//! It records every command it is asked to run and answers from a script
//! keyed by command line; unscripted commands succeed.
//!
//! # Example
//!
//! ```
//! use depsupply::exec::{execute_plan, RecordingRunner, Scripted};
//! use depsupply::planner::{Backend, ManifestState, NpmBackend, Operation, PlanContext};
//!
//! let ctx = PlanContext::new("/build", "/cache");
//! let state = ManifestState { manifest_present: true, ..Default::default() };
//! let plan = NpmBackend.plan_for(&state, Operation::Rebuild, &ctx);
//!
//! let mut runner = RecordingRunner::new();
//! runner.script("npm rebuild", Scripted::Exit(1));
//!
//! assert!(execute_plan(&plan, &mut runner).is_err());
//! assert_eq!(runner.command_lines(), vec!["npm rebuild"]);
//! ```

use std::collections::HashMap;
use std::io;

use super::runner::{CommandRunner, RunStatus};
use crate::error::{Result, SupplyError};
use crate::planner::PlannedCommand;

/// Scripted outcome for a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    Succeed,
    /// Ordinary non-zero exit.
    Exit(i32),
    /// The program cannot be started.
    SpawnError,
}

/// Runner that records commands instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    script: HashMap<String, Scripted>,
    ran: Vec<PlannedCommand>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command_line` with `outcome`.
    pub fn script(&mut self, command_line: &str, outcome: Scripted) {
        self.script.insert(command_line.to_string(), outcome);
    }

    /// Commands run so far, in order.
    pub fn ran(&self) -> &[PlannedCommand] {
        &self.ran
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.ran.iter().map(PlannedCommand::command_line).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &PlannedCommand) -> Result<RunStatus> {
        self.ran.push(command.clone());
        let line = command.command_line();
        match self.script.get(&line).copied().unwrap_or(Scripted::Succeed) {
            Scripted::Succeed => Ok(RunStatus::Success),
            Scripted::Exit(code) => Ok(RunStatus::Exited { code: Some(code) }),
            Scripted::SpawnError => Err(SupplyError::Spawn {
                command: line,
                source: io::Error::new(io::ErrorKind::NotFound, "scripted spawn failure"),
            }),
        }
    }
}
