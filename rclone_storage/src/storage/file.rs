use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use tempfile::SpooledTempFile;
use tracing::debug;
use crate::common::constants::SPOOL_MAX_SIZE;
use crate::utils::path::basename;
use super::{OpenMode, RcloneStorage, StorageError};

/// A handle on a remote file that downloads its content on first access.
///
/// Opening never touches the remote. The first read, seek or write copies
/// the file into a spooled buffer, which is kept for the handle's lifetime.
pub struct RemoteFile<'a> {
    name: String,
    storage: &'a RcloneStorage,
    mode: OpenMode,
    /// `None` until the content has been downloaded.
    buffer: Option<SpooledTempFile>,
}

impl<'a> RemoteFile<'a> {
    pub(crate) fn new(name: String, storage: &'a RcloneStorage, mode: OpenMode) -> Self {
        Self {
            name,
            storage,
            mode,
            buffer: None,
        }
    }

    /// The resolved remote path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_materialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Downloads the remote content unless that already happened.
    ///
    /// # Errors
    /// Remote lookups and transfers surface as `StorageError::Remote`.
    pub fn materialize(&mut self) -> Result<(), StorageError> {
        self.loaded()?;
        Ok(())
    }

    fn loaded(&mut self) -> Result<&mut SpooledTempFile, StorageError> {
        let buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None => self.download()?,
        };
        Ok(self.buffer.insert(buffer))
    }

    fn download(&self) -> Result<SpooledTempFile, StorageError> {
        let leaf = basename(&self.name);
        if leaf.is_empty() {
            return Err(StorageError::InvalidName(self.name.clone()));
        }

        let tmp_dir = tempfile::tempdir()?;
        let local_path = tmp_dir.path().join(leaf);
        debug!(name = %self.name, local = ?local_path, "materializing remote file");
        self.storage.remote().get_file(&self.name, &local_path, &[])?;

        let mut buffer = SpooledTempFile::new(SPOOL_MAX_SIZE);
        io::copy(&mut File::open(&local_path)?, &mut buffer)?;
        buffer.seek(SeekFrom::Start(0))?;
        Ok(buffer)
    }

    fn buffer(&mut self) -> io::Result<&mut SpooledTempFile> {
        self.loaded().map_err(io::Error::other)
    }
}

impl Read for RemoteFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.buffer()?.read(buf)
    }
}

impl Seek for RemoteFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.buffer()?.seek(pos)
    }
}

impl Write for RemoteFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.mode != OpenMode::ReadWrite {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("'{}' was opened read-only", self.name),
            ));
        }
        self.buffer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.buffer {
            Some(buffer) => buffer.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RemoteFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFile")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}
