use rclone_storage::{RcloneStorage, Storage};
use crate::errors::CliError;

/// Prints directories first, each with a trailing `/`, then files.
pub fn handle_ls(storage: &RcloneStorage, path: &str) -> Result<(), CliError> {
    let (directories, files) = storage.listdir(path)?;
    for directory in &directories {
        println!("{}/", directory);
    }
    for file in &files {
        println!("{}", file);
    }
    Ok(())
}
