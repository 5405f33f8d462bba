//! Load averages from `/proc/loadavg`.

use std::path::{Path, PathBuf};

use crate::collector::procfs::parser::parse_loadavg;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};

pub struct LoadCollector<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> LoadCollector<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: proc_path.as_ref().join("loadavg"),
        }
    }
}

impl<F: FileSystem> Collector for LoadCollector<F> {
    fn collect(&mut self) -> Result<Reading, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| CollectError::read(&self.path, e))?;
        let load = parse_loadavg(&content)?;

        let averages = [load.load1, load.load5, load.load15];
        let severity = if averages.iter().any(|&l| l > 2.0) {
            Severity::Error
        } else if averages.iter().any(|&l| l > 1.0) {
            Severity::Warning
        } else {
            Severity::Normal
        };

        Ok(Reading::new(
            format!("{:.2}, {:.2}, {:.2}", load.load1, load.load5, load.load15),
            severity,
        ))
    }
}
