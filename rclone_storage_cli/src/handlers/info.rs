use chrono::SecondsFormat;
use rclone_storage::{RcloneStorage, Storage};
use crate::errors::CliError;

pub fn handle_stat(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    let entry = storage.remote().metadata(&storage.path(name)?)?;

    println!("Name:     {}", entry.name);
    println!("Path:     {}", entry.path);
    println!("Type:     {}", if entry.is_dir { "directory" } else { "file" });
    if !entry.is_dir {
        println!("Size:     {}", entry.size);
    }
    if let Some(mime_type) = &entry.mime_type {
        println!("MimeType: {}", mime_type);
    }
    println!("ModTime:  {}", entry.mod_time);
    if let Some(id) = &entry.id {
        println!("ID:       {}", id);
    }
    Ok(())
}

pub fn handle_exists(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    println!("{}", storage.exists(name)?);
    Ok(())
}

pub fn handle_size(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    println!("{}", storage.size(name)?);
    Ok(())
}

pub fn handle_mtime(storage: &RcloneStorage, name: &str) -> Result<(), CliError> {
    let modified = storage.get_modified_time(name)?;
    println!("{}", modified.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    Ok(())
}
