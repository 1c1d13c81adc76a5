//! Rate computation from cumulative counters.
//!
//! Counters only ever grow until a device is re-initialised, a counter wraps
//! or the host reboots. A regression is clamped to a zero delta instead of
//! being turned into a negative (or, for unsigned math, enormous) rate.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::storage::model::{CounterSnapshot, DiskCounters, NetIo, is_tracked_device};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute a counter delta, clamping regressions (resets, wraparound) to 0.
pub fn delta(curr: u64, prev: u64) -> u64 {
    curr.saturating_sub(prev)
}

/// Convert a delta over `dt_secs` into a per-second rate.
///
/// A non-positive or non-finite interval yields 0.0.
pub fn per_second(delta: u64, dt_secs: f64) -> f64 {
    if dt_secs.is_finite() && dt_secs > 0.0 {
        delta as f64 / dt_secs
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Elapsed time policy
// ---------------------------------------------------------------------------

/// How the interval between two snapshots is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DtMode {
    /// Use the configured refresh period. Rates drift from reality when the
    /// loop runs late.
    #[default]
    Nominal,
    /// Use the time between the two snapshots' capture instants.
    Measured,
}

/// Seconds to divide deltas by, according to `mode`.
pub fn elapsed_secs<A, B>(
    prev: &CounterSnapshot<A>,
    curr: &CounterSnapshot<B>,
    period: Duration,
    mode: DtMode,
) -> f64 {
    match mode {
        DtMode::Nominal => period.as_secs_f64(),
        DtMode::Measured => curr
            .taken_at
            .saturating_duration_since(prev.taken_at)
            .as_secs_f64(),
    }
}

// ---------------------------------------------------------------------------
// Rate results
// ---------------------------------------------------------------------------

/// Network throughput in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetRates {
    pub recv_per_sec: f64,
    pub sent_per_sec: f64,
}

/// Read/write throughput of one block device in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceRate {
    pub read_per_sec: f64,
    pub write_per_sec: f64,
}

/// Disk throughput in bytes per second.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskRates {
    /// Sum over devices present in both snapshots.
    pub read_per_sec: f64,
    pub write_per_sec: f64,
    /// Devices that contributed to the sums.
    pub per_device: BTreeMap<String, DeviceRate>,
}

/// Network rates between two counter readings.
pub fn net_rates(prev: &NetIo, curr: &NetIo, dt_secs: f64) -> NetRates {
    NetRates {
        recv_per_sec: per_second(delta(curr.bytes_recv, prev.bytes_recv), dt_secs),
        sent_per_sec: per_second(delta(curr.bytes_sent, prev.bytes_sent), dt_secs),
    }
}

/// Disk rates between two per-device readings.
///
/// Only devices present in both readings count. A device seen for the first
/// time contributes nothing until the next reading; a device that vanished
/// is dropped. RAM and loop devices are ignored even if the caller left them
/// in.
pub fn disk_rates(prev: &DiskCounters, curr: &DiskCounters, dt_secs: f64) -> DiskRates {
    let mut rates = DiskRates::default();
    let mut read_total: u64 = 0;
    let mut write_total: u64 = 0;

    for (device, now) in curr.iter().filter(|(d, _)| is_tracked_device(d)) {
        let Some(before) = prev.get(device) else {
            continue;
        };
        let read = delta(now.read_bytes, before.read_bytes);
        let write = delta(now.write_bytes, before.write_bytes);
        read_total = read_total.saturating_add(read);
        write_total = write_total.saturating_add(write);
        rates.per_device.insert(
            device.clone(),
            DeviceRate {
                read_per_sec: per_second(read, dt_secs),
                write_per_sec: per_second(write, dt_secs),
            },
        );
    }

    rates.read_per_sec = per_second(read_total, dt_secs);
    rates.write_per_sec = per_second(write_total, dt_secs);
    rates
}

// ---------------------------------------------------------------------------
// Rate state
// ---------------------------------------------------------------------------

/// Previous counter snapshots plus the interval policy.
///
/// A failed read (`None`) yields zero rates for that tick and keeps the last
/// good snapshot as the baseline for the next one.
#[derive(Debug, Clone)]
pub struct RateState {
    period: Duration,
    mode: DtMode,
    prev_net: Option<CounterSnapshot<NetIo>>,
    prev_disk: Option<CounterSnapshot<DiskCounters>>,
}

impl RateState {
    pub fn new(period: Duration, mode: DtMode) -> Self {
        Self {
            period,
            mode,
            prev_net: None,
            prev_disk: None,
        }
    }

    pub fn mode(&self) -> DtMode {
        self.mode
    }

    /// Feed the next network reading and get this tick's rates.
    pub fn update_net(&mut self, current: Option<CounterSnapshot<NetIo>>) -> NetRates {
        let Some(current) = current else {
            return NetRates::default();
        };
        let rates = match &self.prev_net {
            Some(prev) => {
                let dt = elapsed_secs(prev, &current, self.period, self.mode);
                net_rates(&prev.counters, &current.counters, dt)
            }
            None => NetRates::default(),
        };
        self.prev_net = Some(current);
        rates
    }

    /// Feed the next disk reading and get this tick's rates.
    pub fn update_disk(&mut self, current: Option<CounterSnapshot<DiskCounters>>) -> DiskRates {
        let Some(current) = current else {
            return DiskRates::default();
        };
        let rates = match &self.prev_disk {
            Some(prev) => {
                let dt = elapsed_secs(prev, &current, self.period, self.mode);
                disk_rates(&prev.counters, &current.counters, dt)
            }
            None => DiskRates::default(),
        };
        self.prev_disk = Some(current);
        rates
    }

    pub fn reset(&mut self) {
        self.prev_net = None;
        self.prev_disk = None;
    }
}
