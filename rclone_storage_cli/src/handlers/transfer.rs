use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use rclone_storage::{OpenMode, RcloneStorage, Storage};
use crate::errors::CliError;

/// Uploads `local` as `name`, or under its own file name.
pub fn handle_put(storage: &RcloneStorage, local: &Path, name: Option<&str>) -> Result<(), CliError> {
    if !local.is_file() {
        return Err(CliError::NotAFile(local.to_path_buf()));
    }
    let saved = storage.force_save(name, local)?;
    println!("Saved '{}'.", saved);
    Ok(())
}

/// Downloads `name` to `destination`. An existing directory receives the
/// file under its remote name.
pub fn handle_get(storage: &RcloneStorage, name: &str, destination: &Path) -> Result<(), CliError> {
    let target = resolve_destination(name, destination)?;
    let mut handle = storage.open(name, OpenMode::Read)?;
    handle.materialize()?;

    let mut out = File::create(&target)?;
    let written = io::copy(&mut handle, &mut out)?;
    println!("Downloaded '{}' to {:?} ({} bytes).", name, target, written);
    Ok(())
}

pub fn handle_cat(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    let mut handle = storage.open(name, OpenMode::Read)?;
    handle.materialize()?;
    io::copy(&mut handle, &mut io::stdout().lock())?;
    Ok(())
}

fn resolve_destination(name: &str, destination: &Path) -> Result<PathBuf, CliError> {
    if !destination.is_dir() {
        return Ok(destination.to_path_buf());
    }
    Path::new(name)
        .file_name()
        .map(|leaf| destination.join(leaf))
        .ok_or_else(|| CliError::InvalidTarget(name.to_string()))
}
