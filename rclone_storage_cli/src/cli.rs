use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and transfer files on an rclone remote", long_about = None)]
pub struct Cli {
    /// Name of the rclone remote (overrides RCLONE_REMOTE)
    #[arg(long, global = true)]
    pub remote: Option<String>,

    /// Directory on the remote that every name is resolved under
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// rclone config file passed through as `--config`
    #[arg(long = "config", value_name = "RCLONE_CONF", global = true)]
    pub config_path: Option<PathBuf>,

    /// JSON settings file, applied before environment and flags
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// rclone executable to run
    #[arg(long, global = true)]
    pub binary: Option<String>,

    /// Kill rclone invocations running longer than this
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Log every rclone invocation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the directories and files below a path
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Show the metadata rclone reports for a name
    Stat { name: String },
    /// Print whether a name exists
    Exists { name: String },
    /// Print the size of a file in bytes
    Size { name: String },
    /// Print the modification time of a name
    Mtime { name: String },
    /// Upload a local file
    Put {
        local: PathBuf,
        /// Remote name; defaults to the local file name
        name: Option<String>,
    },
    /// Download a file to a local path or directory
    Get { name: String, destination: PathBuf },
    /// Delete a name
    #[command(visible_alias = "delete")]
    Rm { name: String },
    /// Write a file's content to stdout
    Cat { name: String },
}
