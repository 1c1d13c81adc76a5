//! System collector for gathering global counters from `/proc/`.

use crate::collector::procfs::parser::{
    CpuTimes, MemInfo, parse_cpu_times, parse_diskstats, parse_meminfo, parse_net_dev,
};
use crate::collector::traits::FileSystem;
use crate::storage::model::{DiskCounters, DiskIo, NetIo, is_tracked_device};
use std::path::Path;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a counter file.
    Io(std::io::Error),
    /// Parse error in a counter file.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Collects system-wide counters from `/proc/`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    fn read(&self, file: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, file);
        Ok(self.fs.read_to_string(Path::new(&path))?)
    }

    /// Collects aggregate CPU jiffies from `/proc/stat`.
    pub fn collect_cpu_times(&self) -> Result<CpuTimes, CollectError> {
        let content = self.read("stat")?;
        parse_cpu_times(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects memory information from `/proc/meminfo`.
    pub fn collect_meminfo(&self) -> Result<MemInfo, CollectError> {
        let content = self.read("meminfo")?;
        parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects per-device cumulative byte counters from `/proc/diskstats`.
    ///
    /// RAM disks and loop devices are left out.
    pub fn collect_disk_counters(&self) -> Result<DiskCounters, CollectError> {
        let content = self.read("diskstats")?;
        let disks = parse_diskstats(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(disks
            .into_iter()
            .filter(|disk| is_tracked_device(&disk.device))
            .map(|disk| {
                let io = DiskIo::new(disk.read_bytes(), disk.write_bytes());
                (disk.device, io)
            })
            .collect())
    }

    /// Collects cumulative network counters from `/proc/net/dev`, summed
    /// over every interface including loopback.
    pub fn collect_net_counters(&self) -> Result<NetIo, CollectError> {
        let content = self.read("net/dev")?;
        let devices = parse_net_dev(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(devices.iter().fold(NetIo::default(), |acc, dev| NetIo {
            bytes_sent: acc.bytes_sent.saturating_add(dev.tx_bytes),
            bytes_recv: acc.bytes_recv.saturating_add(dev.rx_bytes),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_collect_cpu_times() {
        let collector = SystemCollector::new(MockFs::raspberry_pi(), "/proc");
        let cpu = collector.collect_cpu_times().unwrap();
        assert_eq!(cpu.user, 10000);
        assert_eq!(cpu.idle, 80000);
    }

    #[test]
    fn test_collect_disk_counters_skips_ram_and_loop() {
        let collector = SystemCollector::new(MockFs::raspberry_pi(), "/proc");
        let disks = collector.collect_disk_counters().unwrap();

        assert!(!disks.contains_key("ram0"));
        assert!(!disks.contains_key("loop0"));
        assert_eq!(disks.len(), 3);
        assert_eq!(disks["mmcblk0"], DiskIo::new(200_000 * 512, 100_000 * 512));
    }

    #[test]
    fn test_collect_net_counters_sums_interfaces() {
        let collector = SystemCollector::new(MockFs::raspberry_pi(), "/proc");
        let net = collector.collect_net_counters().unwrap();
        assert_eq!(net.bytes_recv, 1_005_000);
        assert_eq!(net.bytes_sent, 255_000);
    }

    #[test]
    fn test_collect_meminfo() {
        let collector = SystemCollector::new(MockFs::raspberry_pi(), "/proc");
        let mem = collector.collect_meminfo().unwrap();
        assert_eq!(mem.mem_total, 3884000);
        let pct = mem.used_percent().unwrap();
        assert!((pct - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert!(matches!(
            collector.collect_disk_counters(),
            Err(CollectError::Io(_))
        ));
    }

    #[test]
    fn test_custom_proc_path() {
        let fs = MockFs::new();
        fs.add_file("/host/proc/stat", "cpu  1 2 3 4 5 6 7 8 0 0\n");
        let collector = SystemCollector::new(fs, "/host/proc");
        assert_eq!(collector.collect_cpu_times().unwrap().steal, 8);
    }
}
