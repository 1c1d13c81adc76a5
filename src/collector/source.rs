//! The metric source adapter: one best-effort query per metric category.
//!
//! Every query answers `Option`; `None` means the metric is unavailable on
//! this host right now (missing tool, missing sensor, unreadable or
//! unparseable counter file). Nothing here returns an error.

use std::path::Path;

use tracing::debug;

use crate::collector::procfs::{CpuTimes, SystemCollector};
use crate::collector::sensors::SensorCollector;
use crate::collector::traits::{CommandRunner, DiskUsageProbe, FileSystem};
use crate::collector::vcgencmd::Vcgencmd;
use crate::storage::model::{DiskCounters, NetIo, PowerStatus};

/// Best-effort access to every telemetry category the dashboard shows.
pub struct MetricSource<F: FileSystem + Clone, C: CommandRunner + Clone> {
    system: SystemCollector<F>,
    sensors: SensorCollector<F>,
    vcgencmd: Vcgencmd<C>,
    commands: C,
    usage: Box<dyn DiskUsageProbe>,
    /// Jiffies from the previous `cpu_percent` call.
    prev_cpu: Option<CpuTimes>,
}

impl<F: FileSystem + Clone, C: CommandRunner + Clone> MetricSource<F, C> {
    /// Creates a new source.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `commands` - Command runner (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `sys_path` - Base path to sysfs (usually "/sys")
    pub fn new(
        fs: F,
        commands: C,
        proc_path: impl Into<String>,
        sys_path: impl Into<String>,
    ) -> Self {
        Self {
            system: SystemCollector::new(fs.clone(), proc_path),
            sensors: SensorCollector::new(fs, sys_path),
            vcgencmd: Vcgencmd::new(commands.clone()),
            commands,
            usage: Box::new(crate::collector::traits::SysinfoDisks),
            prev_cpu: None,
        }
    }

    /// Replaces the filesystem capacity probe.
    pub fn with_usage_probe(mut self, probe: impl DiskUsageProbe + 'static) -> Self {
        self.usage = Box::new(probe);
        self
    }

    /// CPU busy percent since the previous call.
    ///
    /// The first successful call only records a baseline and reports 0.0.
    pub fn cpu_percent(&mut self) -> Option<f64> {
        let now = match self.system.collect_cpu_times() {
            Ok(times) => times,
            Err(e) => {
                debug!(error = %e, "cpu times unavailable");
                return None;
            }
        };
        let pct = self
            .prev_cpu
            .map(|prev| now.busy_percent_since(&prev))
            .unwrap_or(0.0);
        self.prev_cpu = Some(now);
        Some(pct)
    }

    /// Temperature in degrees Celsius.
    ///
    /// Uses `vcgencmd` when it is installed and its output parses, and the
    /// first non-zero kernel sensor otherwise.
    pub fn temperature(&self) -> Option<f64> {
        self.vcgencmd
            .available()
            .then(|| self.vcgencmd.measure_temp())
            .flatten()
            .or_else(|| self.sensors.first_nonzero_temperature())
    }

    /// GPU utilization approximated from the core clock.
    pub fn gpu_percent(&self) -> Option<f64> {
        if !self.vcgencmd.available() {
            return None;
        }
        self.vcgencmd.gpu_percent()
    }

    /// Raw throttle and voltage strings.
    pub fn power(&self) -> PowerStatus {
        self.vcgencmd.power_status()
    }

    /// Per-device cumulative disk counters, RAM and loop devices excluded.
    pub fn disk_counters(&self) -> Option<DiskCounters> {
        self.system
            .collect_disk_counters()
            .inspect_err(|e| debug!(error = %e, "disk counters unavailable"))
            .ok()
    }

    /// System-wide cumulative network counters.
    pub fn net_counters(&self) -> Option<NetIo> {
        self.system
            .collect_net_counters()
            .inspect_err(|e| debug!(error = %e, "network counters unavailable"))
            .ok()
    }

    /// Memory in use, in percent.
    pub fn memory_percent(&self) -> Option<f64> {
        self.system.collect_meminfo().ok()?.used_percent()
    }

    /// Used share of the root filesystem, in percent.
    pub fn root_disk_percent(&self) -> Option<f64> {
        self.usage.used_percent(Path::new("/"))
    }

    /// First address reported by `hostname -I`.
    pub fn primary_ip(&self) -> Option<String> {
        let out = self.commands.output("hostname", &["-I"])?;
        out.split_whitespace().next().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{FixedUsage, MockCommands, MockFs};

    fn pi() -> (MockFs, MockCommands, MetricSource<MockFs, MockCommands>) {
        let fs = MockFs::raspberry_pi();
        let cmds = MockCommands::raspberry_pi();
        let source = MetricSource::new(fs.clone(), cmds.clone(), "/proc", "/sys")
            .with_usage_probe(FixedUsage(Some(41.5)));
        (fs, cmds, source)
    }

    #[test]
    fn test_cpu_percent_baseline_then_delta() {
        let (fs, _, mut source) = pi();
        assert_eq!(source.cpu_percent(), Some(0.0));

        // +300 busy jiffies, +100 idle
        fs.add_file("/proc/stat", "cpu  10300 500 3000 80100 1000 200 100 0 0 0\n");
        let pct = source.cpu_percent().unwrap();
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_percent_unavailable() {
        let (fs, _, mut source) = pi();
        fs.remove_file("/proc/stat");
        assert_eq!(source.cpu_percent(), None);
    }

    #[test]
    fn test_temperature_prefers_vcgencmd() {
        let (_, _, source) = pi();
        assert_eq!(source.temperature(), Some(48.3));
    }

    #[test]
    fn test_temperature_parse_failure_falls_back_to_sensors() {
        let (_, cmds, source) = pi();
        cmds.set_output("vcgencmd", &["measure_temp"], "error=2");
        assert_eq!(source.temperature(), Some(48.312));

        cmds.clear_output("vcgencmd", &["measure_temp"]);
        assert_eq!(source.temperature(), Some(48.312));
    }

    #[test]
    fn test_temperature_parse_failure_without_sensors() {
        let fs = MockFs::raspberry_pi();
        fs.remove_file("/sys/class/thermal/thermal_zone0/temp");
        let cmds = MockCommands::raspberry_pi();
        cmds.set_output("vcgencmd", &["measure_temp"], "temp=??'C");
        let source = MetricSource::new(fs, cmds, "/proc", "/sys");
        assert_eq!(source.temperature(), None);
    }

    #[test]
    fn test_temperature_falls_back_to_sensors() {
        let source = MetricSource::new(
            MockFs::generic_host(),
            MockCommands::bare_host(),
            "/proc",
            "/sys",
        );
        assert_eq!(source.temperature(), Some(52.0));
        assert_eq!(source.gpu_percent(), None);
        assert_eq!(source.power(), PowerStatus::default());
    }

    #[test]
    fn test_counters_and_summary() {
        let (_, _, source) = pi();
        let disks = source.disk_counters().unwrap();
        assert!(disks.keys().all(|d| d.starts_with("mmcblk0")));
        assert_eq!(source.net_counters().unwrap().bytes_recv, 1_005_000);
        assert!(source.memory_percent().is_some());
        assert_eq!(source.root_disk_percent(), Some(41.5));
        assert_eq!(source.primary_ip().as_deref(), Some("192.168.1.42"));
    }

    #[test]
    fn test_missing_counter_files_are_unavailable() {
        let source = MetricSource::new(MockFs::new(), MockCommands::new(), "/proc", "/sys")
            .with_usage_probe(FixedUsage(None));
        assert_eq!(source.disk_counters(), None);
        assert_eq!(source.net_counters(), None);
        assert_eq!(source.memory_percent(), None);
        assert_eq!(source.temperature(), None);
        assert_eq!(source.primary_ip(), None);
    }
}
