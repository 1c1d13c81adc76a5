//! Raspberry Pi VideoCore readings via the `vcgencmd` tool.
//!
//! Output formats handled:
//! - `measure_temp`        → `temp=48.3'C`
//! - `measure_clock core`  → `core=500000000` (older firmware: `frequency(1)=500000000`)
//! - `get_throttled`       → `throttled=0x50000`
//! - `measure_volts`       → `volt=0.8563V`
//!
//! Anything else is treated as unavailable.

use tracing::debug;

use crate::collector::traits::CommandRunner;
use crate::storage::model::PowerStatus;

/// Name of the VideoCore diagnostic tool.
pub const VCGENCMD: &str = "vcgencmd";

/// Core clock treated as 100% GPU utilization.
pub const MAX_CORE_CLOCK_HZ: f64 = 600_000_000.0;

/// Parses `temp=<float>'C` into degrees Celsius.
pub fn parse_temp(output: &str) -> Option<f64> {
    let value = output.trim().strip_prefix("temp=")?;
    let value = value.strip_suffix("'C").unwrap_or(value);
    value.trim().parse().ok().filter(|t: &f64| t.is_finite())
}

/// Parses `<name>=<int>` clock output into hertz.
pub fn parse_clock(output: &str) -> Option<u64> {
    let (_, value) = output.trim().split_once('=')?;
    value.trim().parse().ok()
}

/// Parses `throttled=<hex>` into the raw flag word.
pub fn parse_throttled(output: &str) -> Option<u32> {
    let value = output.trim().strip_prefix("throttled=")?;
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(hex, 16).ok()
}

/// Parses `volt=<float>V` into volts.
pub fn parse_volts(output: &str) -> Option<f64> {
    let value = output.trim().strip_prefix("volt=")?;
    let value = value.strip_suffix('V').unwrap_or(value);
    value.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Converts a core clock into the dashboard's GPU percentage.
pub fn clock_to_percent(clock_hz: u64) -> f64 {
    (clock_hz as f64 / MAX_CORE_CLOCK_HZ * 100.0).clamp(0.0, 100.0)
}

/// Thin wrapper issuing `vcgencmd` queries through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct Vcgencmd<C: CommandRunner> {
    runner: C,
}

impl<C: CommandRunner> Vcgencmd<C> {
    pub fn new(runner: C) -> Self {
        Self { runner }
    }

    /// Returns `true` if `vcgencmd` is on `PATH`.
    pub fn available(&self) -> bool {
        self.runner.available(VCGENCMD)
    }

    fn query(&self, args: &[&str]) -> Option<String> {
        let out = self.runner.output(VCGENCMD, args);
        if out.is_none() {
            debug!(command = VCGENCMD, ?args, "no output");
        }
        out
    }

    /// SoC temperature in degrees Celsius.
    pub fn measure_temp(&self) -> Option<f64> {
        self.query(&["measure_temp"]).as_deref().and_then(parse_temp)
    }

    /// Current core clock in hertz.
    pub fn core_clock(&self) -> Option<u64> {
        self.query(&["measure_clock", "core"])
            .as_deref()
            .and_then(parse_clock)
    }

    /// GPU utilization approximated from the core clock.
    pub fn gpu_percent(&self) -> Option<f64> {
        self.core_clock().map(clock_to_percent)
    }

    /// Raw throttle flags and core voltage strings.
    pub fn power_status(&self) -> PowerStatus {
        if !self.available() {
            return PowerStatus::default();
        }
        PowerStatus {
            throttled: self.query(&["get_throttled"]),
            volts: self.query(&["measure_volts"]),
        }
    }
}
