//! Battery charge from `/sys/class/power_supply`.

use std::path::{Path, PathBuf};

use crate::collector::sysfs::{find_device, read_number};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, Collector, Reading, Severity};
use crate::fmt::percent;

pub struct BatteryCollector<F: FileSystem> {
    fs: F,
    sys_path: PathBuf,
    now_path: PathBuf,
    full: i64,
}

impl<F: FileSystem> BatteryCollector<F> {
    pub fn new(fs: F, sys_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
            now_path: PathBuf::new(),
            full: 0,
        }
    }

    /// Charge-based batteries expose `charge_*`, energy-based ones `energy_*`.
    fn pick_attrs(&self, dir: &Path) -> (PathBuf, PathBuf) {
        if self.fs.exists(&dir.join("charge_full")) {
            (dir.join("charge_full"), dir.join("charge_now"))
        } else {
            (dir.join("energy_full"), dir.join("energy_now"))
        }
    }
}

impl<F: FileSystem> Collector for BatteryCollector<F> {
    fn setup(&mut self) -> Result<(), CollectError> {
        let base = self.sys_path.join("class/power_supply");
        let dir = find_device(&self.fs, &base, "type", "Battery")?;
        let (full_path, now_path) = self.pick_attrs(&dir);

        let full = read_number(&self.fs, &full_path)?;
        if full <= 0 {
            return Err(CollectError::Parse("Failed to read max level".into()));
        }

        self.full = full;
        self.now_path = now_path;
        Ok(())
    }

    fn collect(&mut self) -> Result<Reading, CollectError> {
        let now = read_number(&self.fs, &self.now_path)?;
        if now < 0 {
            return Err(CollectError::Parse("Failed to read current level".into()));
        }

        let perc = percent(now, self.full);
        let severity = if perc > 25 {
            Severity::Normal
        } else if perc > 10 {
            Severity::Warning
        } else {
            Severity::Error
        };

        Ok(Reading::new(format!("{}% BAT", perc), severity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn test_battery_reads_charge() {
        let fs = MockFs::laptop();
        let mut c = BatteryCollector::new(fs.clone(), "/sys");
        c.setup().unwrap();

        let r = c.collect().unwrap();
        assert_eq!(r.text, "80% BAT");
        assert_eq!(r.severity, Severity::Normal);

        fs.add_file("/sys/class/power_supply/BAT0/charge_now", "1000000\n");
        let r = c.collect().unwrap();
        assert_eq!(r.text, "20% BAT");
        assert_eq!(r.severity, Severity::Warning);

        fs.add_file("/sys/class/power_supply/BAT0/charge_now", "250000\n");
        assert_eq!(c.collect().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_battery_overcharged_is_clamped() {
        let fs = MockFs::laptop();
        fs.add_file("/sys/class/power_supply/BAT0/charge_now", "5200000\n");
        let mut c = BatteryCollector::new(fs, "/sys");
        c.setup().unwrap();
        assert_eq!(c.collect().unwrap().text, "100% BAT");
    }

    #[test]
    fn test_battery_energy_attrs() {
        let fs = MockFs::new();
        fs.add_file("/sys/class/power_supply/BAT1/type", "Battery\n");
        fs.add_file("/sys/class/power_supply/BAT1/energy_full", "50000000\n");
        fs.add_file("/sys/class/power_supply/BAT1/energy_now", "25000000\n");

        let mut c = BatteryCollector::new(fs, "/sys");
        c.setup().unwrap();
        assert_eq!(c.collect().unwrap().text, "50% BAT");
    }

    #[test]
    fn test_battery_setup_fails_without_battery() {
        let mut c = BatteryCollector::new(MockFs::headless(), "/sys");
        assert!(matches!(c.setup(), Err(CollectError::NotFound(_))));
    }

    #[test]
    fn test_battery_setup_rejects_zero_capacity() {
        let fs = MockFs::laptop();
        fs.add_file("/sys/class/power_supply/BAT0/charge_full", "0\n");
        let mut c = BatteryCollector::new(fs, "/sys");
        assert!(c.setup().is_err());
    }

    #[test]
    fn test_battery_collect_fails_when_removed() {
        let fs = MockFs::laptop();
        let mut c = BatteryCollector::new(fs.clone(), "/sys");
        c.setup().unwrap();
        fs.remove_file("/sys/class/power_supply/BAT0/charge_now");
        assert!(matches!(c.collect(), Err(CollectError::Read { .. })));
    }
}
