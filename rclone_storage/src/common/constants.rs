/// Executable name used when no explicit binary is configured.
pub const DEFAULT_RCLONE_BINARY: &str = "rclone";

/// Root used when no explicit root is configured.
pub const DEFAULT_ROOT: &str = "/";

// --- Sentinel exit codes ---
// rclone itself only ever exits with a code >= 0, and a signal death is
// reported as the negated signal number, so these stay out of both ranges
// that matter in practice.

/// The executable could not be found on the search path.
pub const EXIT_NOT_FOUND: i32 = -20;

/// Any other failure to spawn or wait for the child process.
pub const EXIT_DISPATCH_FAILED: i32 = -30;

/// The child outlived the configured timeout and was killed.
pub const EXIT_TIMED_OUT: i32 = -40;

/// Exit code carried by errors raised locally, without running rclone.
pub const EXIT_LOCAL_FAILURE: i32 = -1;

// --- rclone subcommands ---
pub const CMD_LSJSON: &str = "lsjson";
pub const CMD_COPY: &str = "copy";
pub const CMD_DELETE: &str = "delete";

/// Flag naming an explicit rclone config file.
pub const CONFIG_FLAG: &str = "--config";

// --- Environment variables consulted by `StorageConfig::apply_env` ---
pub const ENV_REMOTE: &str = "RCLONE_REMOTE";
pub const ENV_REMOTE_ROOT: &str = "RCLONE_REMOTE_ROOT";
pub const ENV_CONFIG_PATH: &str = "RCLONE_CONFIG_PATH";

/// In-memory size of a materialized remote file before it spills to disk (2.5 MiB).
pub const SPOOL_MAX_SIZE: usize = 2_621_440;
