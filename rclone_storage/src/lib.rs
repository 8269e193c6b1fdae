//! Exposes an rclone remote through a filesystem-like [`storage::Storage`] contract.
//!
//! The crate is layered leaves-first:
//! - [`command`]: spawns the external `rclone` executable and captures its output.
//! - [`remote`]: one method per rclone operation, plus `lsjson` parsing.
//! - [`storage`]: path jailing, listing translation and lazily downloaded file handles.

pub mod command;
pub mod common;
pub mod config;
pub mod remote;
pub mod storage;
pub mod utils;

pub use command::{CommandResult, CommandRunner, SystemCommandRunner, Termination};
pub use common::entry::RemoteEntry;
pub use config::{ConfigError, StorageConfig};
pub use remote::{RcloneRemote, RemoteError};
pub use storage::{Content, OpenMode, RcloneStorage, RemoteFile, Storage, StorageError};
