//! Process execution seam for the bake tool.
//!
//! [`BakeRunner`] takes a finished argument vector, plus the context
//! variables to set on the child, and reports what the process did. A non-zero exit is an [`BakeOutcome`], not an error; only
//! failing to start the program is a [`RunError`].

use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors starting the bake tool.
#[derive(Debug, Error)]
pub enum RunError {
    /// The argument vector has no program.
    #[error("empty bake command")]
    EmptyCommand,

    /// The program could not be spawned.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// What a finished bake process reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BakeOutcome {
    /// Exit code, `None` when killed by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl BakeOutcome {
    /// True for a zero exit code.
    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a bake command to completion.
pub trait BakeRunner {
    /// Executes `command` (program first) with `env` added to the inherited
    /// environment, and waits for it.
    fn run(&self, command: &[String], env: &[(String, String)]) -> Result<BakeOutcome, RunError>;
}

/// Runs the bake tool as a child process, blocking until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl BakeRunner for ProcessRunner {
    fn run(&self, command: &[String], env: &[(String, String)]) -> Result<BakeOutcome, RunError> {
        let (program, args) = command.split_first().ok_or(RunError::EmptyCommand)?;
        debug!(%program, ?args, ?env, "spawning bake tool");

        let output = Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        let outcome = BakeOutcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if outcome.is_success() {
            info!(%program, "bake finished");
        } else {
            warn!(%program, status = ?outcome.status, "bake tool failed");
        }
        Ok(outcome)
    }
}

impl<R: BakeRunner + ?Sized> BakeRunner for &R {
    fn run(&self, command: &[String], env: &[(String, String)]) -> Result<BakeOutcome, RunError> {
        (**self).run(command, env)
    }
}

impl<R: BakeRunner + ?Sized> BakeRunner for Box<R> {
    fn run(&self, command: &[String], env: &[(String, String)]) -> Result<BakeOutcome, RunError> {
        (**self).run(command, env)
    }
}
