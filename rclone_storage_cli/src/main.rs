mod cli;
pub mod errors;
mod handlers;

use std::process::ExitCode;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use rclone_storage::{RcloneStorage, StorageConfig};
use crate::cli::{Cli, Commands};
use crate::errors::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so that `cat` output stays clean. `-v` forces `debug`,
/// otherwise `RUST_LOG` applies with `warn` as the fallback.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli)?;
    debug!(?config, "resolved settings");
    let storage = RcloneStorage::new(config)?;

    match cli.command {
        Commands::Ls { path } => handlers::list::handle_ls(&storage, &path),
        Commands::Stat { name } => handlers::info::handle_stat(&storage, &name),
        Commands::Exists { name } => handlers::info::handle_exists(&storage, &name),
        Commands::Size { name } => handlers::info::handle_size(&storage, &name),
        Commands::Mtime { name } => handlers::info::handle_mtime(&storage, &name),
        Commands::Put { local, name } => handlers::transfer::handle_put(&storage, &local, name.as_deref()),
        Commands::Get { name, destination } => handlers::transfer::handle_get(&storage, &name, &destination),
        Commands::Cat { name } => handlers::transfer::handle_cat(&storage, &name),
        Commands::Rm { name } => handlers::remove::handle_rm(&storage, &name),
    }
}

/// Defaults, then the settings file, then the environment, then flags.
fn build_config(cli: &Cli) -> Result<StorageConfig, CliError> {
    let config = match &cli.settings {
        Some(path) => StorageConfig::load(path)?,
        None => StorageConfig::default(),
    };
    let mut config = config.apply_env();

    if let Some(remote) = &cli.remote {
        config.remote = Some(remote.clone());
    }
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(config_path) = &cli.config_path {
        config.config_path = Some(config_path.clone());
    }
    if let Some(binary) = &cli.binary {
        config.binary = binary.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }
    Ok(config)
}
