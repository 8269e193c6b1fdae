use crate::command::{CommandResult, Termination};
use crate::common::constants::EXIT_LOCAL_FAILURE;

/// Message fragments that mark a lookup miss.
const NOT_FOUND_MESSAGES: [&str; 2] = ["directory not found", "file not found"];

/// Errors raised by [`super::RcloneRemote`].
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// rclone never ran to completion: missing executable, spawn failure or timeout.
    /// `code` is one of the `EXIT_*` sentinels.
    #[error("rclone could not be run (code {code}): {detail}")]
    Dispatch { code: i32, detail: String },

    /// rclone was killed by a signal.
    #[error("rclone died with {}.\n{stderr}", describe_signal(.signal))]
    Signaled { signal: i32, stderr: String },

    /// rclone ran and reported a failure.
    #[error("rclone returned non-zero exit status {code}.\n{stderr}")]
    Exit { code: i32, stderr: String },

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// The path names something without a size, i.e. a directory.
    #[error("not a valid file: {0}")]
    NotAValidFile(String),

    /// A local requirement failed before rclone was invoked.
    #[error("{0}")]
    Precondition(String),

    /// `lsjson` printed something other than a JSON array of entries.
    #[error("rclone returned an unparseable listing: {0}")]
    InvalidListing(#[from] serde_json::Error),
}

impl RemoteError {
    /// Maps a finished invocation to an error, or `None` on success.
    pub fn from_result(result: &CommandResult) -> Option<Self> {
        match result.termination {
            Termination::NotRun => Some(Self::Dispatch {
                code: result.exit_code,
                detail: result.stderr_lossy(),
            }),
            Termination::Signaled => Some(Self::Signaled {
                signal: -result.exit_code,
                stderr: result.stderr_lossy(),
            }),
            Termination::Exited if result.exit_code == 0 => None,
            Termination::Exited => Some(Self::Exit {
                code: result.exit_code,
                stderr: result.stderr_lossy(),
            }),
        }
    }

    /// The exit code this error carries. Locally raised errors report `-1`.
    pub fn code(&self) -> i32 {
        match self {
            Self::Dispatch { code, .. } | Self::Exit { code, .. } => *code,
            Self::Signaled { signal, .. } => -signal,
            _ => EXIT_LOCAL_FAILURE,
        }
    }

    /// Captured stderr of the failed invocation, if rclone was run.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Dispatch { detail, .. } => Some(detail),
            Self::Signaled { stderr, .. } | Self::Exit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// Whether this error reports a missing file or directory, either from
    /// a local lookup or in rclone's own error output.
    pub fn is_not_found(&self) -> bool {
        if matches!(self, Self::FileNotFound(_) | Self::DirectoryNotFound(_)) {
            return true;
        }
        let message = self.to_string();
        NOT_FOUND_MESSAGES.iter().any(|pattern| message.contains(pattern))
    }
}

#[cfg(unix)]
fn describe_signal(signal: &i32) -> String {
    nix::sys::signal::Signal::try_from(*signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("unknown signal {}", signal))
}

#[cfg(not(unix))]
fn describe_signal(signal: &i32) -> String {
    format!("unknown signal {}", signal)
}
