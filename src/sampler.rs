//! Fixed-cadence sampling into the history store.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, trace};

use crate::collector::{CommandRunner, FileSystem, MetricSource};
use crate::config::Config;
use crate::rates::RateState;
use crate::storage::HistoryStore;
use crate::storage::model::{CounterSnapshot, SampleFrame, SystemSummary};

/// Sampler state between and during ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Sampling,
}

/// Pulls one frame from the metric source per period.
pub struct Sampler<F: FileSystem + Clone, C: CommandRunner + Clone> {
    source: MetricSource<F, C>,
    rates: RateState,
    period: Duration,
    last_tick: Option<Instant>,
    state: SamplerState,
}

impl<F: FileSystem + Clone, C: CommandRunner + Clone> Sampler<F, C> {
    /// Creates a sampler and records counter baselines at `now`, so the
    /// first tick already reports rates.
    pub fn new(mut source: MetricSource<F, C>, config: &Config, now: Instant) -> Self {
        let mut rates = RateState::new(config.refresh, config.dt_mode);
        rates.update_net(source.net_counters().map(|c| CounterSnapshot::new(c, now)));
        rates.update_disk(source.disk_counters().map(|c| CounterSnapshot::new(c, now)));
        source.cpu_percent();

        Self {
            source,
            rates,
            period: config.refresh,
            last_tick: None,
            state: SamplerState::Idle,
        }
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` if a tick is due at `now`. The first poll is always due.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= self.period,
            None => true,
        }
    }

    /// Runs one tick if the period has elapsed. Returns whether it did.
    pub fn poll(&mut self, now: Instant, store: &mut HistoryStore) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.state = SamplerState::Sampling;
        self.tick(now, store);
        self.last_tick = Some(now);
        self.state = SamplerState::Idle;
        true
    }

    /// Samples every metric and commits the result to `store` in one step.
    fn tick(&mut self, now: Instant, store: &mut HistoryStore) {
        let cpu = self.source.cpu_percent().unwrap_or(0.0);
        let temperature = self.source.temperature().unwrap_or(0.0);
        let gpu = self.source.gpu_percent().unwrap_or(0.0);

        let net_counters = self.source.net_counters();
        let net = self
            .rates
            .update_net(net_counters.map(|c| CounterSnapshot::new(c, now)));
        let disk = self.rates.update_disk(
            self.source
                .disk_counters()
                .map(|c| CounterSnapshot::new(c, now)),
        );

        let frame = SampleFrame {
            cpu,
            temperature,
            net_in: net.recv_per_sec,
            net_out: net.sent_per_sec,
            disk_read: disk.read_per_sec,
            disk_write: disk.write_per_sec,
            gpu,
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
        };
        let power = self.source.power();
        let summary = SystemSummary {
            memory_percent: self.source.memory_percent(),
            root_disk_percent: self.source.root_disk_percent(),
            ip_address: self.source.primary_ip(),
            net_totals: net_counters,
        };

        trace!(
            cpu = frame.cpu,
            temperature = frame.temperature,
            net_in = frame.net_in,
            net_out = frame.net_out,
            disk_read = frame.disk_read,
            disk_write = frame.disk_write,
            gpu = frame.gpu,
            "sampled"
        );
        if disk.per_device.is_empty() {
            debug!("no block devices contributed to disk rates");
        }

        store.set_power(power);
        store.set_summary(summary);
        store.push_frame(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{FixedUsage, MockCommands, MockFs, diskstats_line, net_dev_table};
    use crate::storage::Metric;
    use crate::storage::model::PowerStatus;

    struct Rig {
        fs: MockFs,
        sampler: Sampler<MockFs, MockCommands>,
        store: HistoryStore,
        t0: Instant,
    }

    fn rig() -> Rig {
        let fs = MockFs::raspberry_pi();
        let source = MetricSource::new(fs.clone(), MockCommands::raspberry_pi(), "/proc", "/sys")
            .with_usage_probe(FixedUsage(Some(41.5)));
        let config = Config {
            refresh: Duration::from_secs(1),
            history_len: 10,
            ..Default::default()
        };
        let t0 = Instant::now();
        Rig {
            fs,
            sampler: Sampler::new(source, &config, t0),
            store: HistoryStore::new(config.history_len, config.refresh, 0.0),
            t0,
        }
    }

    #[test]
    fn test_first_poll_is_due() {
        let mut r = rig();
        assert_eq!(r.sampler.state(), SamplerState::Idle);
        assert!(r.sampler.poll(r.t0, &mut r.store));
        assert_eq!(r.store.frames(), 1);
        assert_eq!(r.sampler.state(), SamplerState::Idle);
    }

    #[test]
    fn test_poll_respects_period() {
        let mut r = rig();
        assert!(r.sampler.poll(r.t0, &mut r.store));
        assert!(!r.sampler.poll(r.t0 + Duration::from_millis(999), &mut r.store));
        assert!(r.sampler.poll(r.t0 + Duration::from_secs(1), &mut r.store));
        assert_eq!(r.store.frames(), 2);
    }

    #[test]
    fn test_tick_fills_frame_and_side_data() {
        let mut r = rig();
        r.fs.add_file(
            "/proc/net/dev",
            &net_dev_table(&[("lo", 5000, 5000), ("eth0", 1_002_000, 250_500), ("wlan0", 0, 0)]),
        );
        r.sampler.poll(r.t0 + Duration::from_secs(1), &mut r.store);

        assert_eq!(r.store.latest(Metric::NetIn), 2000.0);
        assert_eq!(r.store.latest(Metric::NetOut), 500.0);
        assert_eq!(r.store.latest(Metric::Temperature), 48.3);
        assert!(r.store.latest(Metric::Gpu) > 80.0);
        assert_eq!(r.store.latest(Metric::DiskRead), 0.0);

        let summary = r.store.summary();
        assert_eq!(summary.root_disk_percent, Some(41.5));
        assert_eq!(summary.ip_address.as_deref(), Some("192.168.1.42"));
        assert_eq!(summary.net_totals.map(|n| n.bytes_recv), Some(1_007_000));
        assert_eq!(
            r.store.power().throttled.as_deref(),
            Some("throttled=0x50000")
        );
    }

    #[test]
    fn test_disk_rates_from_sectors() {
        let mut r = rig();
        let diskstats = [
            diskstats_line(179, 0, "mmcblk0", 200_004, 100_000),
            diskstats_line(7, 0, "loop0", 999_999, 0),
        ]
        .concat();
        r.fs.add_file("/proc/diskstats", &diskstats);
        r.sampler.poll(r.t0, &mut r.store);

        // 4 sectors of 512 bytes over a 1 s nominal period
        assert_eq!(r.store.latest(Metric::DiskRead), 2048.0);
        assert_eq!(r.store.latest(Metric::DiskWrite), 0.0);
    }

    #[test]
    fn test_host_without_sources_reports_zero_frame() {
        let source = MetricSource::new(MockFs::new(), MockCommands::new(), "/proc", "/sys")
            .with_usage_probe(FixedUsage(None));
        let config = Config::default();
        let t0 = Instant::now();
        let mut sampler = Sampler::new(source, &config, t0);
        let mut store = HistoryStore::new(config.history_len, config.refresh, 0.0);

        assert!(sampler.poll(t0, &mut store));
        assert!(sampler.poll(t0 + config.refresh, &mut store));
        for metric in Metric::ALL {
            assert_eq!(store.latest(metric), 0.0, "{:?}", metric);
        }
        assert_eq!(store.power(), &PowerStatus::default());
        assert_eq!(store.summary(), &SystemSummary::default());
    }

    #[test]
    fn test_missing_sources_become_zero() {
        let mut r = rig();
        r.fs.remove_file("/proc/stat");
        r.fs.remove_file("/proc/net/dev");
        r.sampler.poll(r.t0, &mut r.store);
        assert_eq!(r.store.latest(Metric::Cpu), 0.0);
        assert_eq!(r.store.latest(Metric::NetIn), 0.0);
        assert_eq!(r.store.summary().net_totals, None);
        assert_eq!(r.store.frames(), 1);
    }
}
