mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use crate::command::{CommandResult, CommandRunner, SystemCommandRunner};
use crate::common::constants::{CMD_COPY, CMD_DELETE, CMD_LSJSON, CONFIG_FLAG, DEFAULT_RCLONE_BINARY};
use crate::common::entry::RemoteEntry;
use crate::utils::path as remote_path;

pub use error::RemoteError;

/// A client for one rclone remote.
///
/// Every operation is a single rclone invocation (two for `metadata`), built
/// as `[binary, subcommand, --config <path>?, args...]`. Nothing but the
/// configuration is held between calls.
#[derive(Debug, Clone)]
pub struct RcloneRemote {
    remote: String,
    config_path: Option<PathBuf>,
    binary: String,
    runner: Arc<dyn CommandRunner>,
}

impl RcloneRemote {
    /// Creates a client that spawns the `rclone` found on the search path.
    ///
    /// # Arguments
    /// * `remote` - The name of the rclone remote, without the trailing `:`.
    /// * `config_path` - An explicit rclone config file, or `None` for rclone's default.
    pub fn new(remote: impl Into<String>, config_path: Option<PathBuf>) -> Self {
        Self::with_runner(remote, config_path, Arc::new(SystemCommandRunner::new()))
    }

    /// Creates a client that hands every invocation to `runner`.
    pub fn with_runner(
        remote: impl Into<String>,
        config_path: Option<PathBuf>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            remote: remote.into(),
            config_path,
            binary: DEFAULT_RCLONE_BINARY.to_string(),
            runner,
        }
    }

    /// Uses `binary` instead of `rclone` as the first argument.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn remote_prefix(&self, path: &str) -> String {
        format!("{}:{}", self.remote, path)
    }

    /// Runs `rclone <subcommand> [--config <path>] <extra_args...>`.
    ///
    /// # Errors
    /// Any non-zero exit code becomes a `RemoteError`.
    pub fn run_command(&self, subcommand: &str, extra_args: &[String]) -> Result<CommandResult, RemoteError> {
        let mut argv = vec![self.binary.clone(), subcommand.to_string()];
        if let Some(config_path) = &self.config_path {
            argv.push(CONFIG_FLAG.to_string());
            argv.push(config_path.to_string_lossy().into_owned());
        }
        argv.extend_from_slice(extra_args);

        debug!(remote = %self.remote, subcommand = %subcommand, args = ?extra_args, "running rclone");
        let result = self.runner.execute(&argv);
        match RemoteError::from_result(&result) {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    /// Executes `rclone lsjson remote:path [flags]` and parses the listing.
    pub fn list(&self, path: &str, flags: &[&str]) -> Result<Vec<RemoteEntry>, RemoteError> {
        let args = with_flags(vec![self.remote_prefix(path)], flags);
        let result = self.run_command(CMD_LSJSON, &args)?;
        Ok(serde_json::from_slice(&result.stdout)?)
    }

    /// Looks up a single entry.
    ///
    /// Listing a file returns just that file, so `path` is listed first and a
    /// sole entry named like the leaf is returned as is. That entry is not
    /// checked for `is_dir`, so a directory whose listing holds only a
    /// same-named child also matches here. Anything else falls back to
    /// listing the parent and picking the matching directory.
    ///
    /// # Errors
    /// `FileNotFound` when the direct listing has one entry with another name,
    /// `DirectoryNotFound` when the parent listing has no matching directory.
    pub fn metadata(&self, path: &str) -> Result<RemoteEntry, RemoteError> {
        let (head, tail) = remote_path::split(path);

        let mut entries = self.list(path, &[])?;
        if entries.len() == 1 {
            let entry = entries.remove(0);
            if entry.matches(tail) {
                return Ok(entry);
            }
            return Err(RemoteError::FileNotFound(path.to_string()));
        }

        self.list(head, &[])?
            .into_iter()
            .find(|entry| entry.matches(tail) && entry.is_dir)
            .ok_or_else(|| RemoteError::DirectoryNotFound(path.to_string()))
    }

    /// Whether `path` names an existing entry.
    ///
    /// # Errors
    /// Errors reporting a missing file or directory become `false`, including
    /// rclone's own "directory not found" for a missing parent. Every other
    /// failure propagates.
    pub fn exists(&self, path: &str) -> Result<bool, RemoteError> {
        match self.metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Size in bytes of the file at `path`.
    ///
    /// # Errors
    /// `NotAValidFile` when rclone reports a negative size (directories).
    pub fn size(&self, path: &str) -> Result<u64, RemoteError> {
        let size = self.metadata(path)?.size;
        u64::try_from(size).map_err(|_| RemoteError::NotAValidFile(path.to_string()))
    }

    /// Executes `rclone copy local_path remote:dirname(remote_path) [flags]`.
    ///
    /// The file keeps its local name on the remote side.
    pub fn send_file(&self, local_path: &Path, remote_path: &str, flags: &[&str]) -> Result<CommandResult, RemoteError> {
        if !local_path.is_file() {
            return Err(RemoteError::Precondition(format!(
                "send_file only accepts a local file, got {:?}",
                local_path
            )));
        }
        let args = with_flags(
            vec![
                local_path.to_string_lossy().into_owned(),
                self.remote_prefix(remote_path::dirname(remote_path)),
            ],
            flags,
        );
        self.run_command(CMD_COPY, &args)
    }

    /// Executes `rclone copy remote:remote_path dirname(local_path) [flags]`.
    ///
    /// The file keeps its remote name on the local side.
    pub fn get_file(&self, remote_path: &str, local_path: &Path, flags: &[&str]) -> Result<CommandResult, RemoteError> {
        if self.metadata(remote_path)?.is_dir {
            return Err(RemoteError::Precondition(format!(
                "get_file does not accept a remote directory: {}",
                remote_path
            )));
        }
        let local_dir = local_path.parent().filter(|dir| dir.is_dir()).ok_or_else(|| {
            RemoteError::Precondition(format!(
                "get_file only accepts a path inside an existing local directory, got {:?}",
                local_path
            ))
        })?;
        let args = with_flags(
            vec![
                self.remote_prefix(remote_path),
                local_dir.to_string_lossy().into_owned(),
            ],
            flags,
        );
        self.run_command(CMD_COPY, &args)
    }

    /// Executes `rclone delete remote:path [flags]`.
    pub fn delete(&self, path: &str, flags: &[&str]) -> Result<(), RemoteError> {
        let args = with_flags(vec![self.remote_prefix(path)], flags);
        self.run_command(CMD_DELETE, &args)?;
        Ok(())
    }
}

fn with_flags(mut args: Vec<String>, flags: &[&str]) -> Vec<String> {
    args.extend(flags.iter().map(|flag| flag.to_string()));
    args
}
