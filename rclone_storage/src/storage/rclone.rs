use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read, Write};
use std::sync::Arc;
use chrono::{DateTime, FixedOffset};
use tracing::debug;
use crate::command::{CommandRunner, SystemCommandRunner};
use crate::config::StorageConfig;
use crate::remote::RcloneRemote;
use crate::utils::path::{basename, safe_join};
use super::{Content, OpenMode, RemoteFile, Storage, StorageError};

/// [`Storage`] backed by an rclone remote.
///
/// Every name is jailed below `root` before it reaches rclone.
#[derive(Debug, Clone)]
pub struct RcloneStorage {
    root: String,
    remote: RcloneRemote,
}

impl RcloneStorage {
    /// Creates a storage that spawns the configured rclone binary.
    ///
    /// # Errors
    /// `StorageError::Config` when no remote is configured.
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let runner = match config.timeout() {
            Some(timeout) => SystemCommandRunner::with_timeout(timeout),
            None => SystemCommandRunner::new(),
        };
        Self::with_runner(config, Arc::new(runner))
    }

    /// Creates a storage whose rclone invocations all go through `runner`.
    pub fn with_runner(config: StorageConfig, runner: Arc<dyn CommandRunner>) -> Result<Self, StorageError> {
        let remote_name = config.require_remote()?.to_string();
        let remote = RcloneRemote::with_runner(remote_name, config.config_path, runner)
            .with_binary(config.binary);
        Ok(Self {
            root: config.root,
            remote,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// The client this storage drives.
    pub fn remote(&self) -> &RcloneRemote {
        &self.remote
    }

    /// Resolves `name` to the remote path below the root. `"/"` is the root itself.
    ///
    /// # Errors
    /// `SuspiciousPath` when the name resolves outside the root.
    pub fn path(&self, name: &str) -> Result<String, StorageError> {
        let name = if name == "/" { "" } else { name };
        Ok(safe_join(&self.root, name)?)
    }

    fn mod_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError> {
        let entry = self.remote.metadata(&self.path(name)?)?;
        Ok(entry.modified()?)
    }

    /// Copies `reader` into a scratch directory and uploads it from there.
    ///
    /// The scratch directory is removed on every path out of this function.
    fn upload_spooled(&self, target: &str, mut reader: impl Read) -> Result<(), StorageError> {
        let leaf = basename(target);
        if leaf.is_empty() {
            return Err(StorageError::InvalidName(target.to_string()));
        }
        let tmp_dir = tempfile::tempdir()?;
        let local_path = tmp_dir.path().join(leaf);
        {
            let mut tmp_file = File::create(&local_path)?;
            io::copy(&mut reader, &mut tmp_file)?;
            tmp_file.flush()?;
        }
        debug!(target = %target, local = ?local_path, "uploading spooled copy");
        self.remote.send_file(&local_path, target, &[])?;
        Ok(())
    }
}

impl Storage for RcloneStorage {
    type File<'a> = RemoteFile<'a>;

    fn open(&self, name: &str, mode: OpenMode) -> Result<RemoteFile<'_>, StorageError> {
        Ok(RemoteFile::new(self.path(name)?, self, mode))
    }

    fn save(&self, name: &str, content: Content<'_>) -> Result<String, StorageError> {
        let target = self.path(name)?;
        match content {
            // rclone keeps the local file name, so only a file already named
            // like the target can be uploaded in place.
            Content::Path(local)
                if !local.is_file() || local.file_name() == Some(OsStr::new(basename(&target))) =>
            {
                debug!(target = %target, local = ?local, "uploading local file directly");
                self.remote.send_file(&local, &target, &[])?;
            }
            Content::Path(local) => self.upload_spooled(&target, File::open(&local)?)?,
            Content::Stream { reader, .. } => self.upload_spooled(&target, reader)?,
        }
        Ok(name.to_string())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        Ok(self.remote.delete(&self.path(name)?, &[])?)
    }

    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.remote.exists(&self.path(name)?)?)
    }

    fn size(&self, name: &str) -> Result<u64, StorageError> {
        Ok(self.remote.size(&self.path(name)?)?)
    }

    fn listdir(&self, path: &str) -> Result<(Vec<String>, Vec<String>), StorageError> {
        let mut full_path = self.path(path)?;
        if full_path == "/" {
            full_path.clear();
        }

        let (directories, files): (Vec<_>, Vec<_>) = self
            .remote
            .list(&full_path, &[])?
            .into_iter()
            .partition(|entry| entry.is_dir);

        Ok((
            directories.into_iter().map(|entry| entry.name).collect(),
            files.into_iter().map(|entry| entry.name).collect(),
        ))
    }

    // rclone only knows one timestamp per object, so all three accessors agree.

    fn get_modified_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError> {
        self.mod_time(name)
    }

    fn get_accessed_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError> {
        self.mod_time(name)
    }

    fn get_created_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError> {
        self.mod_time(name)
    }
}
