//! Device discovery helpers for `/sys/class/*` trees.

use std::path::{Path, PathBuf};

use crate::collector::CollectError;
use crate::collector::traits::FileSystem;

/// Reads a sysfs attribute, attaching the path to any error.
pub fn read_attr<F: FileSystem>(fs: &F, path: &Path) -> Result<String, CollectError> {
    fs.read_attr(path).map_err(|e| CollectError::read(path, e))
}

/// Reads a sysfs attribute holding a single integer.
pub fn read_number<F: FileSystem>(fs: &F, path: &Path) -> Result<i64, CollectError> {
    let raw = read_attr(fs, path)?;
    raw.parse().map_err(|_| {
        CollectError::Parse(format!("{}: expected integer, got {:?}", path.display(), raw))
    })
}

/// Finds the first device under `base` whose `attr` file starts with `prefix`
/// (ASCII case-insensitive).
///
/// Devices whose attribute cannot be read are skipped.
pub fn find_device<F: FileSystem>(
    fs: &F,
    base: &Path,
    attr: &str,
    prefix: &str,
) -> Result<PathBuf, CollectError> {
    let entries = fs
        .read_dir(base)
        .map_err(|e| CollectError::read(base, e))?;

    let wanted = prefix.to_ascii_lowercase();
    for dir in entries {
        let Ok(value) = fs.read_attr(&dir.join(attr)) else {
            continue;
        };
        if value.to_ascii_lowercase().starts_with(&wanted) {
            return Ok(dir);
        }
    }

    Err(CollectError::NotFound(format!(
        "Failed to find {} with {} {:?}",
        base.display(),
        attr,
        prefix
    )))
}

/// Returns the first entry of `dir` whose file name satisfies `pred`.
pub fn find_entry<F: FileSystem>(
    fs: &F,
    dir: &Path,
    pred: impl Fn(&str) -> bool,
) -> Option<PathBuf> {
    fs.read_dir(dir).ok()?.into_iter().find(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(&pred)
    })
}

/// Matches `<prefix><digits><suffix>`, e.g. `temp1_input` or `fan12_output`.
pub fn is_indexed_attr(name: &str, prefix: &str, suffix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .is_some_and(|idx| !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()))
}
