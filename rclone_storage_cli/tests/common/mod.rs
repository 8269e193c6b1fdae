//!
//! # Test Common Utilities
//!
//! Every test gets its own temporary directory holding a fake `rclone`
//! script. The script serves a remote named `mem` out of a local `store/`
//! directory and appends each invocation to `calls.log`.
//!
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

pub const REMOTE: &str = "mem";

const FAKE_RCLONE: &str = r#"#!/bin/sh
echo "$@" >> "@LOG@"
sub="$1"; shift
if [ "$1" = "--config" ]; then shift 2; fi
local_path() { p="${1#mem:}"; p="${p#/}"; echo "@STORE@/$p"; }
entry() {
  name=$(basename "$1")
  if [ -d "$1" ]; then
    printf '{"Path":"%s","Name":"%s","Size":-1,"MimeType":"inode/directory","ModTime":"2021-01-21T21:57:32Z","IsDir":true}' "$name" "$name"
  else
    size=$(wc -c < "$1" | tr -d ' ')
    printf '{"Path":"%s","Name":"%s","Size":%s,"MimeType":"text/plain","ModTime":"2021-01-21T05:52:50Z","IsDir":false}' "$name" "$name" "$size"
  fi
}
case "$sub" in
  lsjson)
    target=$(local_path "$1")
    if [ -f "$target" ]; then
      printf '['; entry "$target"; printf ']\n'
    elif [ -d "$target" ]; then
      sep=""
      printf '['
      for child in "$target"/*; do
        [ -e "$child" ] || continue
        printf '%s' "$sep"; entry "$child"; sep=","
      done
      printf ']\n'
    else
      echo "error listing: directory not found" >&2
      exit 3
    fi
    ;;
  copy)
    case "$1" in
      mem:*) cp "$(local_path "$1")" "$2/" || exit 1 ;;
      *) dst=$(local_path "$2"); mkdir -p "$dst" && cp "$1" "$dst/" || exit 1 ;;
    esac
    ;;
  delete)
    rm -rf "$(local_path "$1")"
    ;;
  *)
    echo "unknown command: $sub" >&2
    exit 2
    ;;
esac
"#;

/// Represents the context for a single test.
///
/// # Fields
/// * `_temp_dir` - Held for its Drop behavior to ensure cleanup.
/// * `store` - The directory backing the `mem` remote.
/// * `rclone` - The fake rclone executable.
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub store: PathBuf,
    pub rclone: PathBuf,
    log: PathBuf,
    local: PathBuf,
}

impl TestContext {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let store = temp_dir.path().join("store");
        let local = temp_dir.path().join("local");
        fs::create_dir_all(&store)?;
        fs::create_dir_all(&local)?;

        let log = temp_dir.path().join("calls.log");
        let rclone = temp_dir.path().join("rclone");
        let script = FAKE_RCLONE
            .replace("@LOG@", &log.to_string_lossy())
            .replace("@STORE@", &store.to_string_lossy());
        fs::write(&rclone, script)?;
        fs::set_permissions(&rclone, fs::Permissions::from_mode(0o755))?;

        Ok(Self {
            _temp_dir: temp_dir,
            store,
            rclone,
            log,
            local,
        })
    }

    /// The CLI, pointed at the fake remote and isolated from the caller's environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--remote").arg(REMOTE).arg("--binary").arg(&self.rclone);
        cmd
    }

    /// The CLI without any remote settings.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rclone-storage"));
        cmd.env_remove("RCLONE_REMOTE")
            .env_remove("RCLONE_REMOTE_ROOT")
            .env_remove("RCLONE_CONFIG_PATH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Places a file directly in the fake remote's store.
    pub fn put_remote(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.store.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn remote_file(&self, name: &str) -> PathBuf {
        self.store.join(name)
    }

    /// Creates a file in the scratch area outside the remote.
    pub fn local_file(&self, name: &str, content: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.local.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn local_dir(&self) -> &Path {
        &self.local
    }

    /// Every argv line the fake rclone saw, without the executable.
    pub fn calls(&self) -> anyhow::Result<Vec<String>> {
        if !self.log.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&self.log)?.lines().map(str::to_string).collect())
    }
}
