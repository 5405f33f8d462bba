//! Daemon configuration: which routines run, how often, in which colors.
//!
//! Read from TOML; every field has a default, so an empty file (or no file)
//! yields the stock layout: to-do, weather, wifi, time, network, disk, RAM,
//! load, CPU usage, CPU temperature, fan, battery and volume, separated by
//! delimiters.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LENGTH: usize = 10240;
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 1000;
/// Slowest accepted render period.
pub const MAX_RENDER_INTERVAL_MS: u64 = 60_000;

const CONFIG_DIR: &str = "sbar";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Toml { path: PathBuf, source: toml::de::Error },
    Serialize(toml::ser::Error),
    /// Nothing left to run.
    NoRoutines,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => {
                write!(f, "Invalid config {}: {}", path.display(), source)
            }
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::NoRoutines => write!(f, "No routines configured"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::NoRoutines => None,
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Field colors for each severity, as `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub normal: String,
    pub warning: String,
    pub error: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            normal: "#FFFFFF".into(),
            warning: "#BB4F2E".into(),
            error: "#A1273E".into(),
        }
    }
}

impl Colors {
    /// The first color that is not `#RRGGBB`, if any.
    pub fn invalid(&self) -> Option<&str> {
        [&self.normal, &self.warning, &self.error]
            .into_iter()
            .find(|c| !is_hex_color(c))
            .map(String::as_str)
    }
}

/// `#` followed by exactly six hex digits.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// One `[[routine]]` entry. `kind` stays a string so one typo only drops
/// that entry instead of the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineConfig {
    pub kind: String,
    /// Seconds between refreshes.
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default)]
    pub colors: Colors,
}

fn default_interval() -> u64 {
    1
}

impl RoutineConfig {
    pub fn new(kind: &str, interval: u64) -> Self {
        Self {
            kind: kind.to_string(),
            interval,
            colors: Colors::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// strftime pattern.
    pub format: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            format: "%b %d - %I:%M".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Defaults to `$HOME/.TODO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl TodoConfig {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(p) => p.clone(),
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".TODO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub filesystems: Vec<MountConfig>,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            filesystems: vec![
                MountConfig {
                    path: "/".into(),
                    name: "root".into(),
                },
                MountConfig {
                    path: "/home".into(),
                    name: "home".into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl WeatherConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    pub control: String,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            card: None,
            control: "Master".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuTempConfig {
    /// hwmon `name` attribute of the sensor chip.
    pub sensor: String,
}

impl Default for CpuTempConfig {
    fn default() -> Self {
        Self {
            sensor: "coretemp".into(),
        }
    }
}

/// Pins the network or wifi routine to one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wrap fields in `^c#RRGGBB^ ... ^d^` color markup.
    pub color_text: bool,
    pub delimiter: String,
    /// Upper bound of the rendered line in bytes.
    pub max_length: usize,
    pub render_interval_ms: u64,
    #[serde(rename = "routine")]
    pub routines: Vec<RoutineConfig>,
    pub time: TimeConfig,
    pub todo: TodoConfig,
    pub disk: DiskConfig,
    pub weather: WeatherConfig,
    pub volume: VolumeConfig,
    pub cpu_temp: CpuTempConfig,
    pub network: InterfaceConfig,
    pub wifi: InterfaceConfig,
}

impl Default for Config {
    fn default() -> Self {
        let layout = [
            ("todo", 5),
            ("delimiter", 0),
            ("weather", 1800),
            ("delimiter", 0),
            ("wifi", 5),
            ("delimiter", 0),
            ("time", 1),
            ("delimiter", 0),
            ("network", 1),
            ("delimiter", 0),
            ("disk", 5),
            ("delimiter", 0),
            ("ram", 5),
            ("delimiter", 0),
            ("load", 1),
            ("delimiter", 0),
            ("cpu_usage", 1),
            ("delimiter", 0),
            ("cpu_temp", 1),
            ("delimiter", 0),
            ("fan", 1),
            ("delimiter", 0),
            ("battery", 30),
            ("delimiter", 0),
            ("volume", 1),
        ];

        Self {
            color_text: true,
            delimiter: ";".into(),
            max_length: DEFAULT_MAX_LENGTH,
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
            routines: layout
                .iter()
                .map(|&(kind, interval)| RoutineConfig::new(kind, interval))
                .collect(),
            time: TimeConfig::default(),
            todo: TodoConfig::default(),
            disk: DiskConfig::default(),
            weather: WeatherConfig::default(),
            volume: VolumeConfig::default(),
            cpu_temp: CpuTempConfig::default(),
            network: InterfaceConfig::default(),
            wifi: InterfaceConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    /// Loads `explicit` if given, else the first existing file among
    /// [`candidate_paths`], else the defaults. Returns the file used.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        match candidate_paths(xdg, home).into_iter().find(|p| p.is_file()) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Render period, clamped to `1..=MAX_RENDER_INTERVAL_MS` milliseconds.
    pub fn render_interval(&self) -> std::time::Duration {
        let ms = self.render_interval_ms.clamp(1, MAX_RENDER_INTERVAL_MS);
        std::time::Duration::from_millis(ms)
    }
}

/// `$XDG_CONFIG_HOME/sbar/config.toml`, then `$HOME/.config/sbar/config.toml`.
pub fn candidate_paths(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(xdg) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        paths.push(xdg.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    if let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) {
        paths.push(home.join(".config").join(CONFIG_DIR).join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::default();
        assert!(config.color_text);
        assert_eq!(config.delimiter, ";");
        assert_eq!(config.max_length, 10240);
        assert_eq!(config.routines.len(), 25);
        assert_eq!(config.routines[0], RoutineConfig::new("todo", 5));
        assert_eq!(config.routines[2].interval, 1800);
        assert_eq!(config.routines[24].kind, "volume");
        assert_eq!(config.time.format, "%b %d - %I:%M");
    }

    #[test]
    fn test_parse_full_file() {
        let content = r##"
color_text = false
delimiter = "|"
max_length = 512

[[routine]]
kind = "load"
interval = 2
colors = { normal = "#00FF00", warning = "#FFFF00", error = "#FF0000" }

[[routine]]
kind = "delimiter"

[[routine]]
kind = "time"

[time]
format = "%H:%M"

[todo]
path = "/tmp/todo.txt"

[[disk.filesystems]]
path = "/data"
name = "data"

[weather]
latitude = 34.1031
longitude = -118.4163

[network]
interface = "eth0"
"##;
        let config = Config::from_toml(Path::new("test.toml"), content).unwrap();
        assert!(!config.color_text);
        assert_eq!(config.delimiter, "|");
        assert_eq!(config.max_length, 512);
        assert_eq!(config.render_interval_ms, DEFAULT_RENDER_INTERVAL_MS);
        assert_eq!(config.routines.len(), 3);
        assert_eq!(config.routines[0].interval, 2);
        assert_eq!(config.routines[0].colors.normal, "#00FF00");
        assert_eq!(config.routines[2].interval, 1);
        assert_eq!(config.routines[2].colors, Colors::default());
        assert_eq!(config.time.format, "%H:%M");
        assert_eq!(config.todo.resolved_path(), PathBuf::from("/tmp/todo.txt"));
        assert_eq!(config.disk.filesystems.len(), 1);
        assert_eq!(config.weather.coordinates(), Some((34.1031, -118.4163)));
        assert_eq!(config.network.interface.as_deref(), Some("eth0"));
        assert_eq!(config.volume.control, "Master");
        assert_eq!(config.cpu_temp.sensor, "coretemp");
    }

    #[test]
    fn test_missing_routines_keep_default_layout() {
        let config = Config::from_toml(Path::new("x.toml"), "delimiter = \" \"\n").unwrap();
        assert_eq!(config.delimiter, " ");
        assert_eq!(config.routines, Config::default().routines);

        let config = Config::from_toml(Path::new("x.toml"), "routine = []\n").unwrap();
        assert!(config.routines.is_empty());
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let err = Config::from_toml(Path::new("bad.toml"), "max_length = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_render_interval_is_clamped() {
        let config = Config::from_toml(
            Path::new("x.toml"),
            "render_interval_ms = 9223372036854775807\n",
        )
        .unwrap();
        assert_eq!(
            config.render_interval(),
            std::time::Duration::from_millis(MAX_RENDER_INTERVAL_MS)
        );

        let config = Config {
            render_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.render_interval(), std::time::Duration::from_millis(1));
        assert_eq!(
            Config::default().render_interval(),
            std::time::Duration::from_secs(1)
        );
    }

    #[test]
    fn test_color_validation() {
        assert!(is_hex_color("#A1273E"));
        assert!(is_hex_color("#ffffff"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("FFFFFFF"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color("#FFFFFF0"));

        let mut colors = Colors::default();
        assert_eq!(colors.invalid(), None);
        colors.warning = "orange".into();
        assert_eq!(colors.invalid(), Some("orange"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[routine]]\nkind = \"ram\"\ninterval = 5\n").unwrap();

        let (config, used) = Config::discover(Some(&path)).unwrap();
        assert_eq!(used.as_deref(), Some(path.as_path()));
        assert_eq!(config.routines, vec![RoutineConfig::new("ram", 5)]);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_candidate_paths_order() {
        let paths = candidate_paths(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/xdg/sbar/config.toml"),
                PathBuf::from("/home/u/.config/sbar/config.toml"),
            ]
        );
        assert_eq!(candidate_paths(Some("".into()), None), Vec::<PathBuf>::new());
    }

    #[test]
    fn test_print_config_round_trips() {
        let mut config = Config::default();
        config.weather.latitude = Some(40.0);
        config.weather.longitude = Some(-75.5);
        let text = config.to_toml().unwrap();
        assert!(text.contains("[[routine]]"));
        let parsed = Config::from_toml(Path::new("printed.toml"), &text).unwrap();
        assert_eq!(parsed, config);
    }
}
