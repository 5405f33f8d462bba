//! Fan speed from `/sys/class/hwmon`.

use std::path::{Path, PathBuf};

use crate::collector::sysfs::{find_entry, is_indexed_attr, read_number};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::percent;

pub struct FanCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
    output: PathBuf,
    max: i64,
}

impl<F: FileSystem> FanCollector<F> {
    pub fn new(fs: F, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
            output: PathBuf::new(),
            max: 0,
        }
    }

    /// Looks for `fanN_output` in `hwmonX/device` first, then in `hwmonX`.
    fn find_fan(&self) -> Result<PathBuf, CollectError> {
        let base = self.sys_path.join("class/hwmon");
        let hwmons = self
            .fs
            .read_dir(&base)
            .map_err(|e| CollectError::read(&base, e))?;

        for hwmon in hwmons {
            for dir in [hwmon.join("device"), hwmon.clone()] {
                if let Some(fan) =
                    find_entry(&self.fs, &dir, |n| is_indexed_attr(n, "fan", "_output"))
                {
                    return Ok(fan);
                }
            }
        }

        Err(CollectError::NotFound("Failed to find a fan".into()))
    }
}

/// `fan1_output` -> `fan1_max`.
fn max_path(output: &Path) -> Option<PathBuf> {
    let name = output.file_name()?.to_str()?;
    let stem = name.strip_suffix("_output")?;
    Some(output.with_file_name(format!("{}_max", stem)))
}

impl<F: FileSystem> Collector for FanCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        let output = self.find_fan()?;
        let max_path = max_path(&output)
            .ok_or_else(|| CollectError::NotFound("Failed to find a fan".into()))?;

        let max = read_number(&self.fs, &max_path)?;
        if max <= 0 {
            return Err(CollectError::Parse(format!(
                "Failed to read {}",
                max_path.display()
            )));
        }

        self.output = output;
        self.max = max;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let rpm = read_number(&self.fs, &self.output)?;
        if rpm < 0 {
            return Err(CollectError::Parse("Failed to read current fan speed".into()));
        }

        let perc = percent(rpm, self.max);
        let severity = if perc < 75 {
            Severity::Normal
        } else if perc < 90 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(format!("{} RPM", rpm), severity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn test_fan_under_device_dir() {
        let fs = MockFs::laptop();
        let mut c = FanCollector::new(fs.clone(), "/sys");
        c.setup().unwrap();

        let r = c.collect().unwrap();
        assert_eq!(r.text, "2600 RPM");
        assert_eq!(r.severity, Severity::Normal);

        fs.add_file("/sys/class/hwmon/hwmon2/device/fan1_output", "5000\n");
        assert_eq!(c.collect().unwrap().severity, Severity::Warning);

        fs.add_file("/sys/class/hwmon/hwmon2/device/fan1_output", "5900\n");
        assert_eq!(c.collect().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_fan_directly_under_hwmon() {
        let fs = MockFs::new();
        fs.add_file("/sys/class/hwmon/hwmon3/name", "nct6775\n");
        fs.add_file("/sys/class/hwmon/hwmon3/fan2_output", "900\n");
        fs.add_file("/sys/class/hwmon/hwmon3/fan2_max", "1800\n");

        let mut c = FanCollector::new(fs, "/sys");
        c.setup().unwrap();
        assert_eq!(c.collect().unwrap().text, "900 RPM");
    }

    #[test]
    fn test_fan_requires_max() {
        let fs = MockFs::laptop();
        fs.remove_file("/sys/class/hwmon/hwmon2/device/fan1_max");
        let mut c = FanCollector::new(fs, "/sys");
        assert!(matches!(c.setup(), Err(CollectError::Read { .. })));
    }

    #[test]
    fn test_fan_missing() {
        let mut c = FanCollector::new(MockFs::headless(), "/sys");
        assert!(matches!(c.setup(), Err(CollectError::NotFound(_))));
    }

    #[test]
    fn test_max_path() {
        assert_eq!(
            max_path(Path::new("/sys/class/hwmon/hwmon2/fan1_output")),
            Some(PathBuf::from("/sys/class/hwmon/hwmon2/fan1_max"))
        );
        assert_eq!(max_path(Path::new("/x/fan1_input")), None);
    }
}
