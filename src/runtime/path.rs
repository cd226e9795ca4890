//! Path utility functions for normalization and archive entry naming.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by processing `.` and `..` components lexically.
/// This does not access the filesystem and does not follow symlinks.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            _ => {
                result.push(component);
            }
        }
    }
    result
}

/// Compute the archive entry name of `path` relative to `base`.
///
/// Entry names always use `/` as separator, regardless of the host.
/// For example, `/work/project/assets/sub/b.txt` relative to `/work/project`
/// becomes `assets/sub/b.txt`.
///
/// Returns `None` when `path` is not under `base` (the relative path would
/// climb out with `..` or stay absolute, e.g. different drives on Windows).
pub fn entry_name(path: &Path, base: &Path) -> Option<String> {
    let relative = pathdiff::diff_paths(normalize_path(path), normalize_path(base))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
