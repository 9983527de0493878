//! Subprocess execution with bounded retry.

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use arx_core::plan::Invocation;

use crate::error::{ActionError, Result};
use crate::report;

/// Captured result of a completed invocation sequence.
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Whether every step exited successfully
    pub success: bool,
    /// Concatenated standard output of all steps
    pub stdout: String,
    /// Concatenated standard error of all steps
    pub stderr: String,
    /// Failure description, when `success` is false
    pub error: Option<String>,
}

/// Retry schedule for archiver invocations.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Backoff grows linearly: `base_delay * attempt`
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Archive creation writes to a scratch path and renames on success,
    /// so re-running the full step sequence is safe.
    pub fn archiving() -> Self {
        RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }

    /// Extraction mutates the destination in place; a re-run could
    /// partially overwrite already-extracted files, so it gets one attempt.
    pub fn extraction() -> Self {
        RetryPolicy {
            attempts: 1,
            base_delay: Duration::ZERO,
        }
    }
}

/// Executes invocation plans and reports per-attempt progress.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    verbose: bool,
}

impl ProcessRunner {
    pub fn new(verbose: bool) -> Self {
        ProcessRunner { verbose }
    }

    /// Run every step in order, retrying the whole sequence per policy.
    ///
    /// # Errors
    ///
    /// [`ActionError::Spawn`] when a program cannot be started and
    /// [`ActionError::CommandFailed`] when the final attempt exits nonzero.
    pub fn run(&self, steps: &[Invocation], policy: RetryPolicy) -> Result<ExecutionResult> {
        let mut attempt = 1;
        loop {
            match self.run_once(steps) {
                Ok(result) => return Ok(result),
                Err(err) if attempt < policy.attempts => {
                    report::warning(&format!("attempt {attempt} failed: {err}"));
                    thread::sleep(policy.base_delay * attempt);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn run_once(&self, steps: &[Invocation]) -> Result<ExecutionResult> {
        let mut result = ExecutionResult {
            success: true,
            ..ExecutionResult::default()
        };

        for step in steps {
            report::executing(&step.display_line());

            let mut command = Command::new(step.program);
            command.args(&step.args).stdin(Stdio::null());
            if let Some(cwd) = &step.cwd {
                command.current_dir(cwd);
            }

            let output = command.output().map_err(|source| ActionError::Spawn {
                program: step.program.to_string(),
                source,
            })?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            if self.verbose && !stdout.trim().is_empty() {
                println!("{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                eprintln!("{}", stderr.trim_end());
            }
            result.stdout.push_str(&stdout);
            result.stderr.push_str(&stderr);

            if !output.status.success() {
                return Err(ActionError::CommandFailed {
                    program: step.program.to_string(),
                    status: output.status,
                    stderr: stderr.trim().to_string(),
                });
            }
        }

        Ok(result)
    }
}
