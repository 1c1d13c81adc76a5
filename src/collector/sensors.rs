//! Generic temperature sensor enumeration from `/sys`.
//!
//! Chips under `class/hwmon` are scanned first, then `class/thermal` zones,
//! both in sorted path order. Readings are millidegrees Celsius.

use std::path::{Path, PathBuf};

use crate::collector::traits::FileSystem;

/// Reads temperature sensors exposed by the kernel.
pub struct SensorCollector<F: FileSystem> {
    fs: F,
    sys_path: String,
}

impl<F: FileSystem> SensorCollector<F> {
    /// Creates a sensor collector rooted at `sys_path` (usually "/sys").
    pub fn new(fs: F, sys_path: impl Into<String>) -> Self {
        Self {
            fs,
            sys_path: sys_path.into(),
        }
    }

    fn sorted_entries(&self, dir: &Path) -> Vec<PathBuf> {
        let mut entries = self.fs.read_dir(dir).unwrap_or_default();
        entries.sort();
        entries
    }

    fn read_millidegrees(&self, path: &Path) -> Option<f64> {
        let raw = self.fs.read_to_string(path).ok()?;
        let milli: i64 = raw.trim().parse().ok()?;
        Some(milli as f64 / 1000.0)
    }

    /// Candidate sensor files in scan order.
    pub fn sensor_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let hwmon_root = Path::new(&self.sys_path).join("class/hwmon");
        for chip in self.sorted_entries(&hwmon_root) {
            paths.extend(self.sorted_entries(&chip).into_iter().filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("temp") && n.ends_with("_input"))
            }));
        }

        let thermal_root = Path::new(&self.sys_path).join("class/thermal");
        for zone in self.sorted_entries(&thermal_root) {
            let is_zone = zone
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("thermal_zone"));
            if is_zone {
                paths.push(zone.join("temp"));
            }
        }

        paths
    }

    /// First sensor with a non-zero current reading, in degrees Celsius.
    pub fn first_nonzero_temperature(&self) -> Option<f64> {
        self.sensor_paths()
            .iter()
            .filter_map(|p| self.read_millidegrees(p))
            .find(|t| *t != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_skips_zero_reading() {
        let sensors = SensorCollector::new(MockFs::generic_host(), "/sys");
        assert_eq!(sensors.first_nonzero_temperature(), Some(52.0));
    }

    #[test]
    fn test_thermal_zone_fallback() {
        let sensors = SensorCollector::new(MockFs::raspberry_pi(), "/sys");
        assert_eq!(sensors.first_nonzero_temperature(), Some(48.312));
    }

    #[test]
    fn test_sensor_paths_order() {
        let sensors = SensorCollector::new(MockFs::generic_host(), "/sys");
        let paths = sensors.sensor_paths();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/sys/class/hwmon/hwmon0/temp1_input"),
                PathBuf::from("/sys/class/hwmon/hwmon1/temp1_input"),
                PathBuf::from("/sys/class/hwmon/hwmon1/temp2_input"),
                PathBuf::from("/sys/class/thermal/thermal_zone0/temp"),
            ]
        );
    }

    #[test]
    fn test_no_sensors() {
        let fs = MockFs::new();
        fs.add_file("/sys/class/thermal/cooling_device0/cur_state", "0\n");
        fs.add_file("/sys/class/hwmon/hwmon0/temp1_input", "not a number\n");
        let sensors = SensorCollector::new(fs, "/sys");
        assert_eq!(sensors.first_nonzero_temperature(), None);
    }
}
