//! In-memory mock filesystem for testing collectors without real `/sys` and `/proc`.

use crate::collector::traits::FileSystem;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep one handle and rewrite
/// a counter file while a collector thread reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    inner: Arc<RwLock<Tree>>,
}

#[derive(Debug, Default)]
struct Tree {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl Tree {
    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        let mut tree = self.inner.write().unwrap_or_else(|e| e.into_inner());
        tree.add_parents(&path);
        tree.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut tree = self.inner.write().unwrap_or_else(|e| e.into_inner());
        tree.add_parents(&path);
        tree.directories.insert(path);
    }

    /// Removes a file, simulating a device that went away.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let mut tree = self.inner.write().unwrap_or_else(|e| e.into_inner());
        tree.files.remove(path.as_ref());
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let tree = self.inner.read().unwrap_or_else(|e| e.into_inner());
        tree.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let tree = self.inner.read().unwrap_or_else(|e| e.into_inner());
        tree.files.contains_key(path) || tree.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let tree = self.inner.read().unwrap_or_else(|e| e.into_inner());
        if !tree.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = BTreeSet::new();

        for file_path in tree.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &tree.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let fs = MockFs::new();
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");

        assert!(fs.exists(Path::new("/proc/loadavg")));
        assert!(fs.exists(Path::new("/proc")));

        let content = fs.read_to_string(Path::new("/proc/loadavg")).unwrap();
        assert_eq!(content, "0.15 0.10 0.05 1/150 1234\n");
    }

    #[test]
    fn test_mock_fs_read_dir_sorted() {
        let fs = MockFs::new();
        fs.add_file("/sys/class/hwmon/hwmon1/name", "acpitz\n");
        fs.add_file("/sys/class/hwmon/hwmon0/name", "coretemp\n");
        fs.add_file("/sys/class/hwmon/hwmon0/temp1_input", "45000\n");

        let entries = fs.read_dir(Path::new("/sys/class/hwmon")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/sys/class/hwmon/hwmon0"),
                PathBuf::from("/sys/class/hwmon/hwmon1"),
            ]
        );

        let hwmon0 = fs.read_dir(Path::new("/sys/class/hwmon/hwmon0")).unwrap();
        assert_eq!(hwmon0.len(), 2);
    }

    #[test]
    fn test_mock_fs_clones_share_storage() {
        let fs = MockFs::new();
        let reader = fs.clone();
        fs.add_file("/sys/class/net/wlan0/statistics/rx_bytes", "100\n");
        assert_eq!(
            reader
                .read_attr(Path::new("/sys/class/net/wlan0/statistics/rx_bytes"))
                .unwrap(),
            "100"
        );

        fs.remove_file("/sys/class/net/wlan0/statistics/rx_bytes");
        assert!(
            reader
                .read_to_string(Path::new("/sys/class/net/wlan0/statistics/rx_bytes"))
                .is_err()
        );
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert!(fs.read_dir(Path::new("/nonexistent")).is_err());
    }
}
