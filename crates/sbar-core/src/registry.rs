//! Closed set of routine kinds and the factory that turns them into collectors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::collector::disk::Mount;
use crate::collector::traits::FileSystem;
use crate::collector::{
    Amixer, BatteryCollector, Clock, CollectError, Collector, CpuTempCollector,
    CpuUsageCollector, DiskCollector, FanCollector, HttpClient, Iwgetid, LoadCollector,
    NetworkCollector, RamCollector, Statvfs, TimeCollector, TodoCollector, VolumeCollector,
    WeatherCollector, WifiCollector,
};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    Battery,
    CpuTemp,
    CpuUsage,
    Disk,
    Fan,
    Load,
    Network,
    Ram,
    Time,
    Todo,
    Volume,
    Weather,
    Wifi,
    Delimiter,
}

impl RoutineKind {
    pub const ALL: [RoutineKind; 14] = [
        RoutineKind::Battery,
        RoutineKind::CpuTemp,
        RoutineKind::CpuUsage,
        RoutineKind::Disk,
        RoutineKind::Fan,
        RoutineKind::Load,
        RoutineKind::Network,
        RoutineKind::Ram,
        RoutineKind::Time,
        RoutineKind::Todo,
        RoutineKind::Volume,
        RoutineKind::Weather,
        RoutineKind::Wifi,
        RoutineKind::Delimiter,
    ];

    /// Label used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            RoutineKind::Battery => "Battery",
            RoutineKind::CpuTemp => "CPU Temp",
            RoutineKind::CpuUsage => "CPU Usage",
            RoutineKind::Disk => "Disk",
            RoutineKind::Fan => "Fan",
            RoutineKind::Load => "Load",
            RoutineKind::Network => "Network",
            RoutineKind::Ram => "RAM",
            RoutineKind::Time => "Time",
            RoutineKind::Todo => "TODO",
            RoutineKind::Volume => "Volume",
            RoutineKind::Weather => "Weather",
            RoutineKind::Wifi => "Wifi",
            RoutineKind::Delimiter => "Delimiter",
        }
    }

    /// Spelling in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            RoutineKind::Battery => "battery",
            RoutineKind::CpuTemp => "cpu_temp",
            RoutineKind::CpuUsage => "cpu_usage",
            RoutineKind::Disk => "disk",
            RoutineKind::Fan => "fan",
            RoutineKind::Load => "load",
            RoutineKind::Network => "network",
            RoutineKind::Ram => "ram",
            RoutineKind::Time => "time",
            RoutineKind::Todo => "todo",
            RoutineKind::Volume => "volume",
            RoutineKind::Weather => "weather",
            RoutineKind::Wifi => "wifi",
            RoutineKind::Delimiter => "delimiter",
        }
    }
}

impl fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown routine kind {:?}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for RoutineKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutineKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Builds the collector behind a routine kind.
pub trait CollectorFactory {
    /// `Ok(None)` for kinds without a collector (delimiters).
    fn build(
        &self,
        kind: RoutineKind,
        interval: Duration,
        config: &Config,
    ) -> Result<Option<Box<dyn Collector>>, CollectError>;
}

/// Collectors backed by the live system.
pub struct SystemFactory<F: FileSystem + Clone + 'static> {
    fs: F,
    proc_path: PathBuf,
    sys_path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl<F: FileSystem + Clone + 'static> SystemFactory<F> {
    pub fn new(
        fs: F,
        proc_path: impl Into<PathBuf>,
        sys_path: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sys_path: sys_path.into(),
            clock,
        }
    }
}

impl<F: FileSystem + Clone + 'static> CollectorFactory for SystemFactory<F> {
    fn build(
        &self,
        kind: RoutineKind,
        interval: Duration,
        config: &Config,
    ) -> Result<Option<Box<dyn Collector>>, CollectError> {
        let fs = self.fs.clone();
        let collector: Box<dyn Collector> = match kind {
            RoutineKind::Battery => Box::new(BatteryCollector::new(fs, &self.sys_path)),
            RoutineKind::CpuTemp => Box::new(CpuTempCollector::new(
                fs,
                &self.sys_path,
                &config.cpu_temp.sensor,
            )),
            RoutineKind::CpuUsage => Box::new(CpuUsageCollector::new(fs, &self.proc_path)),
            RoutineKind::Disk => {
                let mounts = config
                    .disk
                    .filesystems
                    .iter()
                    .map(|m| Mount {
                        path: m.path.clone(),
                        name: m.name.clone(),
                    })
                    .collect();
                Box::new(DiskCollector::new(Statvfs, mounts))
            }
            RoutineKind::Fan => Box::new(FanCollector::new(fs, &self.sys_path)),
            RoutineKind::Load => Box::new(LoadCollector::new(fs, &self.proc_path)),
            RoutineKind::Network => Box::new(NetworkCollector::new(
                fs,
                &self.sys_path,
                config.network.interface.clone(),
                interval,
            )),
            RoutineKind::Ram => Box::new(RamCollector::new(fs, &self.proc_path)),
            RoutineKind::Time => Box::new(TimeCollector::new(
                config.time.format.clone(),
                Arc::clone(&self.clock),
            )),
            RoutineKind::Todo => Box::new(TodoCollector::new(fs, config.todo.resolved_path())),
            RoutineKind::Volume => Box::new(VolumeCollector::new(Amixer::new(
                config.volume.card.clone(),
                &config.volume.control,
            ))),
            RoutineKind::Weather => {
                let (lat, lon) = config.weather.coordinates().ok_or_else(|| {
                    CollectError::NotFound("Weather coordinates not configured".into())
                })?;
                Box::new(WeatherCollector::new(HttpClient::new()?, lat, lon))
            }
            RoutineKind::Wifi => Box::new(WifiCollector::new(
                fs,
                &self.proc_path,
                Iwgetid,
                config.wifi.interface.clone(),
            )),
            RoutineKind::Delimiter => return Ok(None),
        };
        Ok(Some(collector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{FixedClock, MockFs};

    fn factory() -> SystemFactory<MockFs> {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(9, 41).unwrap());
        SystemFactory::new(MockFs::laptop(), "/proc", "/sys", clock)
    }

    #[test]
    fn test_kind_spelling_round_trips() {
        for kind in RoutineKind::ALL {
            assert_eq!(kind.as_str().parse::<RoutineKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert_eq!(
            "cpu-usage".parse::<RoutineKind>(),
            Err(UnknownKind("cpu-usage".into()))
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RoutineKind::CpuTemp.name(), "CPU Temp");
        assert_eq!(RoutineKind::Todo.name(), "TODO");
        assert_eq!(RoutineKind::Ram.name(), "RAM");
    }

    #[test]
    fn test_factory_builds_working_collectors() {
        let config = Config::default();
        let f = factory();

        let mut load = f
            .build(RoutineKind::Load, Duration::from_secs(1), &config)
            .unwrap()
            .unwrap();
        load.setup().unwrap();
        assert_eq!(load.collect().unwrap().text, "0.50, 0.60, 0.70");

        let mut time = f
            .build(RoutineKind::Time, Duration::from_secs(1), &config)
            .unwrap()
            .unwrap();
        time.setup().unwrap();
        assert_eq!(time.collect().unwrap().text, "Jan 01 - 09:41");
    }

    #[test]
    fn test_factory_delimiter_has_no_collector() {
        let built = factory()
            .build(RoutineKind::Delimiter, Duration::ZERO, &Config::default())
            .unwrap();
        assert!(built.is_none());
    }

    #[test]
    fn test_factory_weather_needs_coordinates() {
        let result = factory().build(
            RoutineKind::Weather,
            Duration::from_secs(1800),
            &Config::default(),
        );
        assert!(matches!(result, Err(CollectError::NotFound(_))));
    }
}
