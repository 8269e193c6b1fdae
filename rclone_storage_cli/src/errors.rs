use std::io;
use std::path::PathBuf;
use thiserror::Error;
use rclone_storage::{ConfigError, RemoteError, StorageError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("The provided path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Invalid target path: {0}")]
    InvalidTarget(String),
}
