use std::io;
use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::runtime::Builder;
use tokio::time::timeout;
use tracing::{debug, warn};
use crate::common::constants::{EXIT_DISPATCH_FAILED, EXIT_NOT_FOUND, EXIT_TIMED_OUT};
use super::{CommandResult, CommandRunner, Termination};

enum Completion {
    Finished(Output),
    TimedOut,
}

/// Spawns real child processes.
///
/// Each call drives the child on its own current-thread tokio runtime and
/// blocks until it finishes, so it must not be called from inside an async
/// runtime. Without a timeout a hung child blocks the caller indefinitely.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    timeout: Option<Duration>,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills children that are still running after `timeout`. Output pipes
    /// held open by their descendants are abandoned.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    fn run(&self, argv: &[String]) -> io::Result<Completion> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(spawn_and_wait(program, args, self.timeout))
    }
}

/// Spawns `program` and collects its output. Dropping the wait on timeout
/// kills the child and closes our ends of its pipes.
async fn spawn_and_wait(program: &str, args: &[String], limit: Option<Duration>) -> io::Result<Completion> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    match limit {
        None => Ok(Completion::Finished(child.wait_with_output().await?)),
        Some(limit) => match timeout(limit, child.wait_with_output()).await {
            Ok(output) => Ok(Completion::Finished(output?)),
            Err(_) => Ok(Completion::TimedOut),
        },
    }
}

impl CommandRunner for SystemCommandRunner {
    fn execute(&self, argv: &[String]) -> CommandResult {
        let program = argv.first().map(String::as_str).unwrap_or_default();
        match self.run(argv) {
            Ok(Completion::Finished(output)) => {
                let result = from_output(output);
                debug!(argv = ?argv, exit_code = result.exit_code, termination = ?result.termination, "command finished");
                result
            }
            Ok(Completion::TimedOut) => {
                let limit = self.timeout.unwrap_or_default();
                warn!(program = %program, timeout = ?limit, "command timed out and was killed");
                CommandResult::not_run(EXIT_TIMED_OUT, format!("'{}' timed out after {:?}", program, limit))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(program = %program, "executable not found");
                CommandResult::not_run(
                    EXIT_NOT_FOUND,
                    format!("Executable '{}' was not found: {}", program, e),
                )
            }
            Err(e) => {
                warn!(argv = ?argv, error = %e, "failed to run command");
                CommandResult::not_run(EXIT_DISPATCH_FAILED, e.to_string())
            }
        }
    }
}

fn from_output(output: Output) -> CommandResult {
    let (exit_code, termination) = classify(output.status);
    CommandResult {
        exit_code,
        termination,
        stdout: output.stdout,
        stderr: output.stderr,
    }
}

#[cfg(unix)]
fn classify(status: ExitStatus) -> (i32, Termination) {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => (code, Termination::Exited),
        (None, Some(signal)) => (-signal, Termination::Signaled),
        (None, None) => (EXIT_DISPATCH_FAILED, Termination::NotRun),
    }
}

#[cfg(not(unix))]
fn classify(status: ExitStatus) -> (i32, Termination) {
    match status.code() {
        Some(code) => (code, Termination::Exited),
        None => (EXIT_DISPATCH_FAILED, Termination::NotRun),
    }
}
