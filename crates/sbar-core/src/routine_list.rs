//! The fixed left-to-right layout of the bar.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::config::{Config, ConfigError, RoutineConfig};
use crate::registry::{CollectorFactory, RoutineKind};
use crate::scheduler::Routine;
use crate::slot::Slot;

/// Weather API courtesy limit.
pub const MIN_WEATHER_INTERVAL: Duration = Duration::from_secs(30);

/// Longest refresh interval accepted for any routine (one day).
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub enum Entry {
    Routine(Arc<Slot>),
    /// A constant glyph between fields.
    Delimiter(String),
}

/// Ordered entries, immutable once built. Only slot contents change.
#[derive(Debug, Clone, Default)]
pub struct RoutineList {
    entries: Vec<Entry>,
}

impl RoutineList {
    /// Builds the layout and the collectors that feed it.
    ///
    /// Bad entries are logged and skipped; only an empty result is an error.
    pub fn build(
        config: &Config,
        factory: &dyn CollectorFactory,
    ) -> Result<(Self, Vec<Routine>), ConfigError> {
        let mut entries = Vec::with_capacity(config.routines.len());
        let mut routines = Vec::new();
        let mut seen = HashSet::new();

        for (idx, entry) in config.routines.iter().enumerate() {
            let kind = match entry.kind.parse::<RoutineKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!("Config: routine #{}: {}, skipping", idx + 1, e);
                    continue;
                }
            };

            if kind == RoutineKind::Delimiter {
                entries.push(Entry::Delimiter(config.delimiter.clone()));
                continue;
            }

            if let Err(reason) = validate(kind, entry, config, &seen) {
                warn!("{} routine: {}, skipping", kind.name(), reason);
                continue;
            }

            let interval = Duration::from_secs(entry.interval);
            let collector = match factory.build(kind, interval, config) {
                Ok(Some(collector)) => collector,
                Ok(None) => continue,
                Err(e) => {
                    warn!("{} routine: {}, skipping", kind.name(), e);
                    continue;
                }
            };

            seen.insert(kind);
            let slot = Arc::new(Slot::new(kind, interval, entry.colors.clone()));
            entries.push(Entry::Routine(Arc::clone(&slot)));
            routines.push(Routine { slot, collector });
        }

        if routines.is_empty() {
            return Err(ConfigError::NoRoutines);
        }

        Ok((Self { entries }, routines))
    }

    /// A layout assembled by hand; no collectors are attached.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routine slots in display order.
    pub fn slots(&self) -> impl Iterator<Item = &Arc<Slot>> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Routine(slot) => Some(slot),
            Entry::Delimiter(_) => None,
        })
    }
}

fn validate(
    kind: RoutineKind,
    entry: &RoutineConfig,
    config: &Config,
    seen: &HashSet<RoutineKind>,
) -> Result<(), String> {
    if seen.contains(&kind) {
        return Err("listed more than once".into());
    }
    if let Some(bad) = entry.colors.invalid() {
        return Err(format!("invalid color {:?}, expected #RRGGBB", bad));
    }
    if entry.interval == 0 {
        return Err("interval must be at least 1 second".into());
    }
    if entry.interval > MAX_INTERVAL.as_secs() {
        return Err(format!(
            "interval must be at most {} seconds",
            MAX_INTERVAL.as_secs()
        ));
    }
    if kind == RoutineKind::Weather {
        if Duration::from_secs(entry.interval) < MIN_WEATHER_INTERVAL {
            return Err(format!(
                "interval must be at least {} seconds",
                MIN_WEATHER_INTERVAL.as_secs()
            ));
        }
        if config.weather.coordinates().is_none() {
            return Err("latitude and longitude are not configured".into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{Clock, FixedClock, MockFs};
    use crate::registry::SystemFactory;

    fn factory() -> SystemFactory<MockFs> {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at(9, 41).unwrap());
        SystemFactory::new(MockFs::laptop(), "/proc", "/sys", clock)
    }

    fn config(kinds: &[(&str, u64)]) -> Config {
        Config {
            routines: kinds
                .iter()
                .map(|&(k, i)| RoutineConfig::new(k, i))
                .collect(),
            ..Config::default()
        }
    }

    fn kinds(list: &RoutineList) -> Vec<String> {
        list.entries()
            .iter()
            .map(|e| match e {
                Entry::Routine(s) => s.kind().to_string(),
                Entry::Delimiter(g) => format!("<{}>", g),
            })
            .collect()
    }

    #[test]
    fn test_build_keeps_config_order() {
        let cfg = config(&[("time", 1), ("delimiter", 0), ("load", 1), ("ram", 5)]);
        let (list, routines) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["time", "<;>", "load", "ram"]);
        assert_eq!(routines.len(), 3);
        assert_eq!(list.slots().count(), 3);
        assert_eq!(routines[2].slot.interval(), Duration::from_secs(5));
        assert!(Arc::ptr_eq(&routines[0].slot, list.slots().next().unwrap()));
    }

    #[test]
    fn test_build_skips_bad_entries() {
        let mut cfg = config(&[
            ("load", 1),
            ("lode", 1),
            ("load", 2),
            ("ram", 0),
            ("weather", 1800),
            ("time", 1),
            ("battery", 30),
        ]);
        cfg.routines[6].colors.error = "#12345".into();

        let (list, routines) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["load", "time"]);
        assert_eq!(routines.len(), 2);
    }

    #[test]
    fn test_build_weather_interval_floor() {
        let mut cfg = config(&[("weather", 29), ("load", 1)]);
        cfg.weather.latitude = Some(34.1);
        cfg.weather.longitude = Some(-118.4);
        let (list, _) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["load"]);

        cfg.routines[0].interval = 30;
        let (list, _) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["weather", "load"]);
    }

    #[test]
    fn test_build_rejects_oversized_interval() {
        let cfg = Config::from_toml(
            std::path::Path::new("huge.toml"),
            "[[routine]]\nkind = \"load\"\ninterval = 9223372036854775807\n\n\
             [[routine]]\nkind = \"time\"\ninterval = 86400\n",
        )
        .unwrap();
        let (list, routines) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["time"]);
        assert_eq!(routines[0].slot.interval(), MAX_INTERVAL);
    }

    #[test]
    fn test_build_uses_global_delimiter() {
        let mut cfg = config(&[("load", 1), ("delimiter", 0), ("delimiter", 0), ("time", 1)]);
        cfg.delimiter = " | ".into();
        let (list, _) = RoutineList::build(&cfg, &factory()).unwrap();
        assert_eq!(kinds(&list), ["load", "< | >", "< | >", "time"]);
    }

    #[test]
    fn test_build_fails_without_routines() {
        let cfg = config(&[]);
        assert!(matches!(
            RoutineList::build(&cfg, &factory()),
            Err(ConfigError::NoRoutines)
        ));

        let cfg = config(&[("delimiter", 0), ("nope", 1)]);
        assert!(matches!(
            RoutineList::build(&cfg, &factory()),
            Err(ConfigError::NoRoutines)
        ));
    }
}
