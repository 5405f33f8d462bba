//! Available memory from `/proc/meminfo`.

use std::path::{Path, PathBuf};

use crate::collector::procfs::parser::parse_meminfo;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::{format_magnitude_1, percent};

pub struct RamCollector<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> RamCollector<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: proc_path.as_ref().join("meminfo"),
        }
    }
}

impl<F: FileSystem> Collector for RamCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        // Fail at startup, not on the first tick, when meminfo is unusable.
        self.collect().map(|_| ())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| CollectError::read(&self.path, e))?;
        let mem = parse_meminfo(&content)?;

        let used = mem.total.saturating_sub(mem.available);
        let used_perc = percent(used as i64, mem.total as i64);
        let severity = if used_perc < 75 {
            Severity::Normal
        } else if used_perc < 90 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(
            format!(
                "{} free/{}",
                format_magnitude_1(mem.available),
                format_magnitude_1(mem.total)
            ),
            severity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn test_ram_formats_free_and_total() {
        let mut c = RamCollector::new(MockFs::laptop(), "/proc");
        c.setup().unwrap();
        let r = c.collect().unwrap();
        assert_eq!(r.text, "8.2G free/16.4G");
        assert_eq!(r.severity, Severity::Normal);
    }

    #[test]
    fn test_ram_severity_from_used_share() {
        let fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000000 kB\nMemAvailable: 200000 kB\n",
        );
        let mut c = RamCollector::new(fs.clone(), "/proc");
        assert_eq!(c.collect().unwrap().severity, Severity::Warning);

        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000000 kB\nMemAvailable: 50000 kB\n",
        );
        assert_eq!(c.collect().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_ram_setup_fails_without_meminfo() {
        let mut c = RamCollector::new(MockFs::headless(), "/proc");
        assert!(c.setup().is_err());
    }
}
