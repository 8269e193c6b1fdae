mod system;

use std::fmt::Debug;

pub use system::SystemCommandRunner;

/// How an invocation ended. Decides how `exit_code` is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// The process exited on its own; `exit_code` is its status.
    #[default]
    Exited,
    /// The process was killed by a signal; `exit_code` is the negated signal number.
    Signaled,
    /// The process never ran to completion; `exit_code` is one of the
    /// `EXIT_*` sentinels in [`crate::common::constants`].
    NotRun,
}

/// Outcome of one external invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub termination: Termination,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandResult {
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// A process that exited with a non-zero status of its own.
    pub fn failure(exit_code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// A process killed by `signal`.
    pub fn signaled(signal: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: -signal,
            termination: Termination::Signaled,
            stderr: stderr.into(),
            ..Self::default()
        }
    }

    /// An invocation that never completed; `sentinel` is an `EXIT_*` code.
    pub fn not_run(sentinel: i32, detail: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: sentinel,
            termination: Termination::NotRun,
            stderr: detail.into(),
            ..Self::default()
        }
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim_end().to_string()
    }
}

/// Runs an external program to completion.
///
/// Implementations never interpret the exit code; that is left to the
/// caller. Swapping the implementation lets the remote client be driven
/// without spawning real processes.
pub trait CommandRunner: Send + Sync + Debug {
    /// Runs `argv[0]` with the remaining arguments and buffers both output streams.
    fn execute(&self, argv: &[String]) -> CommandResult;
}
