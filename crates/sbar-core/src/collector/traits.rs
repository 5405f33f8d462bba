//! Filesystem seam shared by every file-backed collector.
//!
//! Battery, hwmon, network and `/proc` readers all go through [`FileSystem`],
//! so tests can hand them a [`MockFs`](super::MockFs) laid out like a laptop's
//! `/sys` and `/proc` trees.

use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the `/sys` and `/proc` trees.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory, sorted by path.
    ///
    /// Sorting keeps device discovery deterministic (`hwmon0` before `hwmon1`).
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Reads a sysfs attribute: the first line of the file, trimmed.
    fn read_attr(&self, path: &Path) -> io::Result<String> {
        let content = self.read_to_string(path)?;
        Ok(content.lines().next().unwrap_or("").trim().to_string())
    }
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(path)? {
            paths.push(entry?.path());
        }
        paths.sort();
        Ok(paths)
    }
}
