mod file;
mod rclone;

use std::fmt;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use chrono::{DateTime, FixedOffset};
use crate::config::ConfigError;
use crate::remote::RemoteError;
use crate::utils::path::PathError;
use crate::utils::time::TimestampError;

pub use file::RemoteFile;
pub use rclone::RcloneStorage;

/// Errors raised through the [`Storage`] contract.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage was constructed without a usable configuration.
    #[error("Storage is improperly configured: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A name tried to leave the storage root.
    #[error("Suspicious file operation: {0}")]
    SuspiciousPath(#[from] PathError),

    #[error("Invalid modification time: {0}")]
    InvalidTimestamp(#[from] TimestampError),

    /// `force_save` got neither a name nor named content.
    #[error("No name was given and the content has none")]
    MissingName,

    /// The name resolves to something that cannot hold a file, such as the root.
    #[error("'{0}' does not name a file")]
    InvalidName(String),

    #[error("Local file system error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// The underlying remote error, if any.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}

/// How a [`Storage::open`] handle may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenMode {
    /// Reads and seeks only.
    #[default]
    Read,
    /// Writes go to the local buffer; they are not uploaded.
    ReadWrite,
}

/// Data handed to [`Storage::save`].
pub enum Content<'a> {
    /// A file that already exists on the local disk.
    Path(PathBuf),
    /// Any byte stream, optionally carrying its own name.
    Stream {
        name: Option<String>,
        reader: Box<dyn Read + 'a>,
    },
}

impl<'a> Content<'a> {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Content::Path(path.into())
    }

    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Content::Stream {
            name: None,
            reader: Box::new(reader),
        }
    }

    pub fn named_reader(name: impl Into<String>, reader: impl Read + 'a) -> Self {
        Content::Stream {
            name: Some(name.into()),
            reader: Box::new(reader),
        }
    }

    /// The content's own name: a local file's name, or the stream's name.
    pub fn name(&self) -> Option<String> {
        match self {
            Content::Path(path) => path.file_name().map(|n| n.to_string_lossy().into_owned()),
            Content::Stream { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Content::Stream { name, .. } => f.debug_struct("Stream").field("name", name).finish_non_exhaustive(),
        }
    }
}

impl From<Vec<u8>> for Content<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Content::from_reader(Cursor::new(bytes))
    }
}

impl<'a> From<&'a [u8]> for Content<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Content::from_reader(bytes)
    }
}

impl From<PathBuf> for Content<'static> {
    fn from(path: PathBuf) -> Self {
        Content::Path(path)
    }
}

impl From<&Path> for Content<'static> {
    fn from(path: &Path) -> Self {
        Content::Path(path.to_path_buf())
    }
}

/// A filesystem-like storage contract, as consumed by web frameworks.
///
/// Names are relative to the storage's root; implementations decide how
/// they map onto the backing store.
pub trait Storage {
    /// Handle returned by [`Storage::open`].
    type File<'a>: Read + Seek
    where
        Self: 'a;

    /// Returns a handle on `name`. Implementations may defer all I/O until
    /// the handle is first read.
    fn open(&self, name: &str, mode: OpenMode) -> Result<Self::File<'_>, StorageError>;

    /// Stores `content` under `name` and returns the name it was stored under.
    fn save(&self, name: &str, content: Content<'_>) -> Result<String, StorageError>;

    fn delete(&self, name: &str) -> Result<(), StorageError>;

    fn exists(&self, name: &str) -> Result<bool, StorageError>;

    fn size(&self, name: &str) -> Result<u64, StorageError>;

    /// Lists `path` as `(directories, files)`, both by leaf name.
    fn listdir(&self, path: &str) -> Result<(Vec<String>, Vec<String>), StorageError>;

    fn get_modified_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError>;

    fn get_accessed_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError>;

    fn get_created_time(&self, name: &str) -> Result<DateTime<FixedOffset>, StorageError>;

    /// Saves arbitrary content, taking the name from the content when none is given.
    fn force_save<'c>(&self, name: Option<&str>, content: impl Into<Content<'c>>) -> Result<String, StorageError> {
        let content = content.into();
        let name = match name {
            Some(name) => name.to_string(),
            None => content.name().ok_or(StorageError::MissingName)?,
        };
        self.save(&name, content)
    }
}
