//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

// ============ CPU Stats Parser ============

/// Aggregate CPU jiffies from the `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// Jiffies spent not doing work (idle + iowait).
    pub fn idle_total(&self) -> u64 {
        self.idle + self.iowait
    }

    /// All accounted jiffies. Guest time is already folded into user/nice.
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Busy percentage between `prev` and `self`.
    ///
    /// Returns 0.0 when no jiffies elapsed or the counters went backwards.
    pub fn busy_percent_since(&self, prev: &CpuTimes) -> f64 {
        let total = self.total().saturating_sub(prev.total());
        if total == 0 {
            return 0.0;
        }
        let idle = self.idle_total().saturating_sub(prev.idle_total()).min(total);
        ((total - idle) as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
pub fn parse_cpu_times(content: &str) -> Result<CpuTimes, ParseError> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ParseError::new("missing aggregate cpu line"))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(ParseError::new("truncated cpu line"));
    }

    let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

    Ok(CpuTimes {
        user: get_val(1),
        nice: get_val(2),
        system: get_val(3),
        idle: get_val(4),
        iowait: get_val(5),
        irq: get_val(6),
        softirq: get_val(7),
        steal: get_val(8),
    })
}

// ============ Memory Info Parser ============

/// Parsed data from `/proc/meminfo` (values in kB).
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemInfo {
    /// Share of memory in use, `(total - available) / total`, in percent.
    ///
    /// Kernels older than 3.14 lack `MemAvailable`; free + buffers + cached
    /// stands in for it there.
    pub fn used_percent(&self) -> Option<f64> {
        if self.mem_total == 0 {
            return None;
        }
        let available = if self.mem_available > 0 {
            self.mem_available
        } else {
            self.mem_free + self.buffers + self.cached
        };
        let used = self.mem_total.saturating_sub(available);
        Some(used as f64 / self.mem_total as f64 * 100.0)
    }
}

/// Parses `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = parse_kb(line);
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        }
    }

    if info.mem_total == 0 {
        return Err(ParseError::new("missing MemTotal"));
    }
    Ok(info)
}

// ============ Disk Stats Parser ============

/// Sector size used by `/proc/diskstats`, independent of the device's own.
pub const SECTOR_SIZE: u64 = 512;

/// Parsed data from `/proc/diskstats`.
#[derive(Debug, Clone, Default)]
pub struct DiskStats {
    /// Block device major number.
    pub major: u32,
    /// Block device minor number.
    pub minor: u32,
    /// Device name (mmcblk0, sda1, ram0, ...)
    pub device: String,
    /// Number of reads completed
    pub reads: u64,
    /// Number of sectors read
    pub read_sectors: u64,
    /// Number of writes completed
    pub writes: u64,
    /// Number of sectors written
    pub write_sectors: u64,
}

impl DiskStats {
    pub fn read_bytes(&self) -> u64 {
        self.read_sectors.saturating_mul(SECTOR_SIZE)
    }

    pub fn write_bytes(&self) -> u64 {
        self.write_sectors.saturating_mul(SECTOR_SIZE)
    }
}

/// Parses `/proc/diskstats` content.
///
/// Format: major minor name reads r_merged r_sectors r_time writes w_merged
/// w_sectors w_time io_pending io_time w_io_time [discards ...]
pub fn parse_diskstats(content: &str) -> Result<Vec<DiskStats>, ParseError> {
    let mut disks = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 14 {
            continue; // Skip malformed lines
        }

        let get_val =
            |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

        disks.push(DiskStats {
            major: parts[0].parse().unwrap_or(0),
            minor: parts[1].parse().unwrap_or(0),
            device: parts[2].to_string(),
            reads: get_val(3),
            read_sectors: get_val(5),
            writes: get_val(7),
            write_sectors: get_val(9),
        });
    }

    Ok(disks)
}

// ============ Network Device Stats Parser ============

/// Parsed data from `/proc/net/dev`.
#[derive(Debug, Clone, Default)]
pub struct NetDevStats {
    /// Interface name (eth0, lo, etc.)
    pub interface: String,
    /// Bytes received
    pub rx_bytes: u64,
    /// Packets received
    pub rx_packets: u64,
    /// Bytes transmitted
    pub tx_bytes: u64,
    /// Packets transmitted
    pub tx_packets: u64,
}

/// Parses `/proc/net/dev` content.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Result<Vec<NetDevStats>, ParseError> {
    let mut devices = Vec::new();

    for line in content.lines() {
        // Skip header lines
        if line.contains('|') || line.trim().is_empty() {
            continue;
        }

        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };

        let values: Vec<&str> = counters.split_whitespace().collect();
        if values.len() < 16 {
            continue;
        }

        let get_val =
            |idx: usize| -> u64 { values.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

        devices.push(NetDevStats {
            interface: name.trim().to_string(),
            rx_bytes: get_val(0),
            rx_packets: get_val(1),
            tx_bytes: get_val(8),
            tx_packets: get_val(9),
        });
    }

    if devices.is_empty() {
        return Err(ParseError::new("no interfaces in net/dev"));
    }
    Ok(devices)
}
