//! Declarative dashboard extensions.
//!
//! Each `*.toml` file in the plugins directory is one extension. A manifest
//! may only use the hooks below; unknown keys are rejected.
//!
//! ```toml
//! name = "soc"
//!
//! [[stat]]
//! label = "ARM"
//! path = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq"
//! scale = 1000
//! unit = "MHz"
//!
//! [[threshold]]
//! metric = "temperature"
//! above = 70.0
//! label = "HOT"
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::collector::FileSystem;
use crate::storage::{HistoryStore, Metric};

/// Sidebar stat read from a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatHook {
    pub label: String,
    pub path: PathBuf,
    /// Divisor applied when the value is numeric.
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Highlighted sidebar entry while a metric is above a limit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdHook {
    pub metric: Metric,
    pub above: f64,
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    stat: Vec<StatHook>,
    #[serde(default)]
    threshold: Vec<ThresholdHook>,
}

/// A loaded extension.
#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    pub name: String,
    pub stats: Vec<StatHook>,
    pub thresholds: Vec<ThresholdHook>,
}

#[derive(Debug)]
pub enum PluginError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            PluginError::Parse { path, message } => {
                write!(f, "invalid manifest {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Io { source, .. } => Some(source),
            PluginError::Parse { .. } => None,
        }
    }
}

impl Plugin {
    /// Parses a manifest. The name defaults to the file stem.
    pub fn parse(path: &Path, text: &str) -> Result<Self, PluginError> {
        let manifest: Manifest = toml::from_str(text).map_err(|e| PluginError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let name = manifest
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "unnamed".to_string());

        Ok(Self {
            name,
            stats: manifest.stat,
            thresholds: manifest.threshold,
        })
    }

    /// Reads and parses the manifest at `path`.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, PluginError> {
        let text = fs.read_to_string(path).map_err(|source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }
}

/// One line of plugin output in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginEntry {
    pub label: String,
    pub value: String,
    /// Render highlighted.
    pub alert: bool,
}

/// Formats a stat file's content: first line, optionally scaled.
fn format_stat(hook: &StatHook, raw: &str) -> String {
    let line = raw.lines().next().unwrap_or("").trim();
    let value = match (hook.scale, line.parse::<f64>()) {
        (Some(scale), Ok(v)) if scale != 0.0 => format!("{:.1}", v / scale),
        _ => line.to_string(),
    };
    match &hook.unit {
        Some(unit) => format!("{value} {unit}"),
        None => value,
    }
}

/// Extensions loaded from one directory.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    dir: PathBuf,
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Loads every `*.toml` manifest in `dir`, in file name order.
    ///
    /// A missing directory gives an empty registry. Manifests that cannot be
    /// read or parsed are skipped with a warning.
    pub fn load(dir: impl Into<PathBuf>, fs: &dyn FileSystem) -> Self {
        let mut registry = Self {
            dir: dir.into(),
            plugins: Vec::new(),
        };
        registry.reload(fs);
        registry
    }

    /// Rebuilds the registry from the directory.
    pub fn reload(&mut self, fs: &dyn FileSystem) {
        self.plugins.clear();

        let mut manifests = match fs.read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %self.dir.display(), error = %e, "plugins directory not readable");
                return;
            }
        };
        manifests.retain(|p| p.extension().is_some_and(|ext| ext == "toml"));
        manifests.sort();

        for path in manifests {
            match Plugin::load(fs, &path) {
                Ok(plugin) => {
                    info!(
                        plugin = %plugin.name,
                        stats = plugin.stats.len(),
                        thresholds = plugin.thresholds.len(),
                        "plugin loaded"
                    );
                    self.plugins.push(plugin);
                }
                Err(e) => warn!(error = %e, "skipping plugin"),
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name.as_str()).collect()
    }

    /// Evaluates every hook against the filesystem and the latest samples.
    pub fn sidebar_entries(&self, fs: &dyn FileSystem, store: &HistoryStore) -> Vec<PluginEntry> {
        let mut entries = Vec::new();
        for plugin in &self.plugins {
            for hook in &plugin.stats {
                let value = match fs.read_to_string(&hook.path) {
                    Ok(raw) => format_stat(hook, &raw),
                    Err(_) => "-".to_string(),
                };
                entries.push(PluginEntry {
                    label: hook.label.clone(),
                    value,
                    alert: false,
                });
            }
            for hook in &plugin.thresholds {
                let latest = store.latest(hook.metric);
                entries.push(PluginEntry {
                    label: hook.label.clone(),
                    value: format!("{:.1}", latest),
                    alert: latest > hook.above,
                });
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MockFs, RealFs};
    use std::time::Duration;

    const SOC: &str = r#"
name = "soc"

[[stat]]
label = "ARM"
path = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq"
scale = 1000
unit = "MHz"

[[threshold]]
metric = "temperature"
above = 70.0
label = "HOT"
"#;

    fn plugins_fs() -> MockFs {
        let fs = MockFs::new();
        fs.add_file("/etc/raspimon/plugins/20-soc.toml", SOC);
        fs.add_file(
            "/etc/raspimon/plugins/10-uptime.toml",
            "[[stat]]\nlabel = \"Up\"\npath = \"/proc/uptime\"\n",
        );
        fs.add_file("/etc/raspimon/plugins/30-broken.toml", "[[stat]\nlabel =");
        fs.add_file(
            "/etc/raspimon/plugins/40-exec.toml",
            "[[exec]]\ncommand = \"rm -rf /\"\n",
        );
        fs.add_file("/etc/raspimon/plugins/README.md", "not a manifest");
        fs.add_file(
            "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq",
            "1500000\n",
        );
        fs.add_file("/proc/uptime", "12345.67 40000.00\n");
        fs
    }

    #[test]
    fn test_load_sorted_and_skips_invalid() {
        let fs = plugins_fs();
        let registry = PluginRegistry::load("/etc/raspimon/plugins", &fs);
        assert_eq!(registry.names(), vec!["10-uptime", "soc"]);
        assert_eq!(registry.plugins()[1].thresholds[0].metric, Metric::Temperature);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let registry = PluginRegistry::load("/nowhere", &MockFs::new());
        assert!(registry.is_empty());
        assert_eq!(registry.dir(), Path::new("/nowhere"));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let fs = plugins_fs();
        let mut registry = PluginRegistry::load("/etc/raspimon/plugins", &fs);
        fs.remove_file("/etc/raspimon/plugins/10-uptime.toml");
        fs.add_file("/etc/raspimon/plugins/30-broken.toml", "name = \"fixed\"\n");
        registry.reload(&fs);
        assert_eq!(registry.names(), vec!["soc", "fixed"]);
    }

    #[test]
    fn test_sidebar_entries() {
        let fs = plugins_fs();
        let registry = PluginRegistry::load("/etc/raspimon/plugins", &fs);
        let mut store = HistoryStore::new(5, Duration::from_secs(1), 0.0);

        let entries = registry.sidebar_entries(&fs, &store);
        assert_eq!(
            entries,
            vec![
                PluginEntry {
                    label: "Up".into(),
                    value: "12345.67 40000.00".into(),
                    alert: false,
                },
                PluginEntry {
                    label: "ARM".into(),
                    value: "1500.0 MHz".into(),
                    alert: false,
                },
                PluginEntry {
                    label: "HOT".into(),
                    value: "0.0".into(),
                    alert: false,
                },
            ]
        );

        store.append(Metric::Temperature, 71.5);
        fs.remove_file("/proc/uptime");
        let entries = registry.sidebar_entries(&fs, &store);
        assert_eq!(entries[0].value, "-");
        assert!(entries[2].alert);
        assert_eq!(entries[2].value, "71.5");
    }

    #[test]
    fn test_parse_error_message() {
        let err = Plugin::parse(Path::new("bad.toml"), "threshold = 3").unwrap_err();
        assert!(matches!(err, PluginError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid manifest bad.toml"));
    }

    #[test]
    fn test_load_from_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), "name = \"beta\"\n").unwrap();
        std::fs::write(dir.path().join("a.toml"), "name = \"alpha\"\n").unwrap();
        std::fs::write(dir.path().join("c.toml"), "name = [").unwrap();

        let registry = PluginRegistry::load(dir.path(), &RealFs);
        assert_eq!(registry.names(), vec!["alpha", "beta"]);
    }
}
