//! Data types shared by the collectors, the rate calculator and the store.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Deserialize;

/// Block device name prefixes that are never tracked: RAM disks and loop
/// devices.
pub const EXCLUDED_DEVICE_PREFIXES: [&str; 2] = ["ram", "loop"];

/// Returns `false` for ephemeral/virtual block devices.
pub fn is_tracked_device(name: &str) -> bool {
    !EXCLUDED_DEVICE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// System-wide cumulative network byte counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetIo {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Cumulative byte counters of one block device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskIo {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

impl DiskIo {
    pub fn new(read_bytes: u64, write_bytes: u64) -> Self {
        Self {
            read_bytes,
            write_bytes,
        }
    }
}

/// Per-device disk counters keyed by device name. The key set is the
/// observed device set for one sample.
pub type DiskCounters = BTreeMap<String, DiskIo>;

/// Cumulative counters captured at one instant.
///
/// Immutable once captured; the rate calculator replaces it with the next
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSnapshot<T> {
    pub counters: T,
    pub taken_at: Instant,
}

impl<T> CounterSnapshot<T> {
    pub fn new(counters: T, taken_at: Instant) -> Self {
        Self { counters, taken_at }
    }
}

/// The rolling series kept by the history store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cpu,
    Temperature,
    NetIn,
    NetOut,
    DiskRead,
    DiskWrite,
    Gpu,
}

impl Metric {
    pub const COUNT: usize = 7;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Cpu,
        Metric::Temperature,
        Metric::NetIn,
        Metric::NetOut,
        Metric::DiskRead,
        Metric::DiskWrite,
        Metric::Gpu,
    ];

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Temperature => "Temp",
            Metric::NetIn => "Net in",
            Metric::NetOut => "Net out",
            Metric::DiskRead => "Disk read",
            Metric::DiskWrite => "Disk write",
            Metric::Gpu => "GPU",
        }
    }
}

/// Everything appended to the history during one sampling tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleFrame {
    /// CPU busy percent.
    pub cpu: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Received bytes per second.
    pub net_in: f64,
    /// Sent bytes per second.
    pub net_out: f64,
    /// Bytes read per second, summed over tracked devices.
    pub disk_read: f64,
    /// Bytes written per second, summed over tracked devices.
    pub disk_write: f64,
    /// Core clock as a percentage of the nominal maximum.
    pub gpu: f64,
    /// Unix time of the tick, in seconds.
    pub timestamp: f64,
}

impl SampleFrame {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Temperature => self.temperature,
            Metric::NetIn => self.net_in,
            Metric::NetOut => self.net_out,
            Metric::DiskRead => self.disk_read,
            Metric::DiskWrite => self.disk_write,
            Metric::Gpu => self.gpu,
        }
    }
}

/// Raw `vcgencmd` power readings, shown verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerStatus {
    /// e.g. `throttled=0x50000`
    pub throttled: Option<String>,
    /// e.g. `volt=0.8563V`
    pub volts: Option<String>,
}

/// Latest-only values for the sidebar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSummary {
    pub memory_percent: Option<f64>,
    pub root_disk_percent: Option<f64>,
    pub ip_address: Option<String>,
    /// Cumulative counters since boot.
    pub net_totals: Option<NetIo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_filter() {
        assert!(!is_tracked_device("ram0"));
        assert!(!is_tracked_device("loop2"));
        assert!(is_tracked_device("sdb1"));
        assert!(is_tracked_device("mmcblk0p2"));
        assert!(is_tracked_device("zram0"));
    }

    #[test]
    fn test_metric_index_matches_all() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_frame_value() {
        let frame = SampleFrame {
            disk_write: 7.0,
            gpu: 3.0,
            ..Default::default()
        };
        assert_eq!(frame.value(Metric::DiskWrite), 7.0);
        assert_eq!(frame.value(Metric::Gpu), 3.0);
        assert_eq!(frame.value(Metric::Cpu), 0.0);
    }
}
