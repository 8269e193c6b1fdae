use rclone_storage::{RcloneStorage, Storage};
use crate::errors::CliError;

pub fn handle_rm(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    storage.delete(name)?;
    println!("Deleted '{}'.", name);
    Ok(())
}
