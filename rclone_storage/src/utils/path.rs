//! Helpers for the forward-slash paths rclone expects on the remote side.

/// Errors raised while resolving a name below a storage root.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// The joined path resolves outside the root.
    #[error("The joined path '{name}' is located outside of the base path '{root}'")]
    OutsideRoot { name: String, root: String },
}

/// Collapses `.`, `..` and repeated separators of an absolute path.
///
/// `..` at the top level stays at `/`. The result never carries a trailing
/// slash, except for the root itself.
fn normalize(raw_path: &str) -> String {
    let mut components: Vec<&str> = Vec::new();
    for component in raw_path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            comp => components.push(comp),
        }
    }
    format!("/{}", components.join("/"))
}

/// Joins `name` below `root` and refuses any result outside of `root`.
///
/// Backslashes are treated as separators. An absolute `name` replaces the
/// root before the check, so it is only accepted when it already points
/// inside it.
///
/// - `safe_join("/", "a/../b.txt")` -> `Ok("/b.txt")`
/// - `safe_join("/bar", ".")` -> `Ok("/bar")`
/// - `safe_join("/bar", "..")` -> `Err(OutsideRoot)`
pub fn safe_join(root: &str, name: &str) -> Result<String, PathError> {
    let root_norm = normalize(&root.replace('\\', "/"));
    let name_fwd = name.replace('\\', "/");

    let joined = if name_fwd.starts_with('/') {
        normalize(&name_fwd)
    } else {
        normalize(&format!("{}/{}", root_norm, name_fwd))
    };

    let inside = root_norm == "/"
        || joined == root_norm
        || joined
            .strip_prefix(&root_norm)
            .is_some_and(|rest| rest.starts_with('/'));
    if !inside {
        return Err(PathError::OutsideRoot {
            name: name.to_string(),
            root: root_norm,
        });
    }
    Ok(joined)
}

/// Splits a path into `(head, tail)` around the last separator.
///
/// Trailing separators are stripped from the head unless it consists of
/// separators only.
///
/// - `"/a/b.txt"` -> `("/a", "b.txt")`
/// - `"b.txt"` -> `("", "b.txt")`
/// - `"/b.txt"` -> `("/", "b.txt")`
pub fn split(path: &str) -> (&str, &str) {
    let idx = path.rfind('/').map_or(0, |i| i + 1);
    let (head, tail) = path.split_at(idx);
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() {
        (head, tail)
    } else {
        (trimmed, tail)
    }
}

/// The directory part of `path`, see [`split`].
pub fn dirname(path: &str) -> &str {
    split(path).0
}

/// The final component of `path`, see [`split`].
pub fn basename(path: &str) -> &str {
    split(path).1
}
