#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use rclone_storage::{CommandResult, CommandRunner, RcloneStorage, StorageConfig};

pub const REMOTE: &str = "mem";
pub const MOD_TIME: &str = "2021-01-21T05:52:50.123456789Z";

// --- In-memory rclone ---
// Interprets the `lsjson`, `copy` and `delete` invocations the client emits
// against a map of object key -> bytes, so the storage can be exercised end
// to end without an rclone binary.

#[derive(Debug, Default)]
pub struct InMemoryRclone {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl InMemoryRclone {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put(&self, key: &str, data: &[u8]) {
        self.objects.lock().unwrap().insert(key.trim_matches('/').to_string(), data.to_vec());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key.trim_matches('/')).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls().into_iter().map(|argv| argv[1].clone()).collect()
    }

    fn remote_key<'a>(&self, arg: &'a str) -> Option<&'a str> {
        arg.strip_prefix(REMOTE)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|path| path.trim_matches('/'))
    }

    fn lsjson(&self, key: &str) -> CommandResult {
        let objects = self.objects.lock().unwrap();
        if let Some(data) = objects.get(key) {
            let leaf = key.rsplit('/').next().unwrap_or(key);
            return CommandResult::success(listing(&[file_json(leaf, data.len())]));
        }

        let prefix = if key.is_empty() { String::new() } else { format!("{}/", key) };
        let mut dirs: Vec<String> = Vec::new();
        let mut files = Vec::new();
        for (object, data) in objects.iter() {
            let Some(rest) = object.strip_prefix(&prefix) else { continue };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    if !dirs.iter().any(|d| d == dir) {
                        dirs.push(dir.to_string());
                    }
                }
                None => files.push(file_json(rest, data.len())),
            }
        }
        if !key.is_empty() && dirs.is_empty() && files.is_empty() {
            return CommandResult::failure(3, format!("error listing: directory not found: {}", key));
        }

        let mut entries: Vec<String> = dirs.iter().map(|d| dir_json(d)).collect();
        entries.extend(files);
        CommandResult::success(listing(&entries))
    }

    fn copy(&self, src: &str, dst: &str) -> CommandResult {
        match (self.remote_key(src), self.remote_key(dst)) {
            // download
            (Some(key), None) => {
                let Some(data) = self.get(key) else {
                    return CommandResult::failure(3, "file not found");
                };
                let leaf = key.rsplit('/').next().unwrap_or(key);
                match fs::write(Path::new(dst).join(leaf), data) {
                    Ok(()) => CommandResult::success(""),
                    Err(e) => CommandResult::failure(1, e.to_string()),
                }
            }
            // upload
            (None, Some(dir)) => {
                let local = Path::new(src);
                let Ok(data) = fs::read(local) else {
                    return CommandResult::failure(1, "failed to read source");
                };
                let leaf = local.file_name().unwrap().to_string_lossy();
                let key = if dir.is_empty() { leaf.to_string() } else { format!("{}/{}", dir, leaf) };
                self.objects.lock().unwrap().insert(key, data);
                CommandResult::success("")
            }
            _ => CommandResult::failure(2, "unsupported copy"),
        }
    }

    fn delete(&self, key: &str) -> CommandResult {
        let prefix = format!("{}/", key);
        self.objects
            .lock()
            .unwrap()
            .retain(|object, _| object != key && !object.starts_with(&prefix));
        CommandResult::success("")
    }
}

impl CommandRunner for InMemoryRclone {
    fn execute(&self, argv: &[String]) -> CommandResult {
        self.calls.lock().unwrap().push(argv.to_vec());
        let args: Vec<&str> = argv[2..].iter().map(String::as_str).collect();
        let args = match args.as_slice() {
            ["--config", _, rest @ ..] => rest.to_vec(),
            rest => rest.to_vec(),
        };
        match (argv[1].as_str(), args.as_slice()) {
            ("lsjson", [path]) => match self.remote_key(path) {
                Some(key) => self.lsjson(key),
                None => CommandResult::failure(2, "not a remote path"),
            },
            ("copy", [src, dst]) => self.copy(src, dst),
            ("delete", [path]) => match self.remote_key(path) {
                Some(key) => self.delete(key),
                None => CommandResult::failure(2, "not a remote path"),
            },
            _ => CommandResult::failure(2, format!("unexpected invocation: {:?}", argv)),
        }
    }
}

fn file_json(name: &str, size: usize) -> String {
    format!(
        r#"{{"Path":"{name}","Name":"{name}","Size":{size},"MimeType":"application/octet-stream","ModTime":"{MOD_TIME}","IsDir":false}}"#
    )
}

fn dir_json(name: &str) -> String {
    format!(
        r#"{{"Path":"{name}","Name":"{name}","Size":-1,"MimeType":"inode/directory","ModTime":"{MOD_TIME}","IsDir":true}}"#
    )
}

fn listing(entries: &[String]) -> String {
    format!("[{}]", entries.join(","))
}

// --- Scripted rclone ---

/// Replays canned results in order, recording each argv.
#[derive(Debug, Default)]
pub struct ScriptedRclone {
    results: Mutex<VecDeque<CommandResult>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRclone {
    pub fn new(results: Vec<CommandResult>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Answers every invocation with `stdout` and exit code 0.
    pub fn always(stdout: &str, times: usize) -> Arc<Self> {
        Self::new((0..times).map(|_| CommandResult::success(stdout)).collect())
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRclone {
    fn execute(&self, argv: &[String]) -> CommandResult {
        self.calls.lock().unwrap().push(argv.to_vec());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| CommandResult::failure(99, "no scripted result left"))
    }
}

/// Helper: a storage rooted at `root` whose invocations go to `runner`.
pub fn storage_with(root: &str, runner: Arc<dyn CommandRunner>) -> RcloneStorage {
    RcloneStorage::with_runner(StorageConfig::new(REMOTE).with_root(root), runner).unwrap()
}
