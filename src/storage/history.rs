//! Per-metric rolling history plus the latest-only side data of a tick.

use std::time::Duration;

use crate::storage::model::{Metric, PowerStatus, SampleFrame, SystemSummary};
use crate::storage::series::MetricSeries;

/// Default number of samples retained per metric.
pub const DEFAULT_HISTORY_LEN: usize = 120;

/// Bounded history of every dashboard metric.
///
/// Written only by the sampler, read by the renderer. All series share one
/// capacity and advance together through [`push_frame`](Self::push_frame).
#[derive(Debug, Clone)]
pub struct HistoryStore {
    series: Vec<MetricSeries>,
    /// Unix seconds of each sample slot.
    timestamps: MetricSeries,
    power: PowerStatus,
    summary: SystemSummary,
    frames: u64,
}

impl HistoryStore {
    /// Creates a store with every series filled with 0.0.
    ///
    /// Placeholder timestamps run back from `now` (unix seconds) one
    /// `period` apart, the newest one `period` before `now`.
    pub fn new(capacity: usize, period: Duration, now: f64) -> Self {
        let capacity = capacity.max(1);
        let step = period.as_secs_f64();
        let seeded = (0..capacity)
            .map(|i| now - (capacity - i) as f64 * step)
            .collect();

        Self {
            series: Metric::ALL
                .iter()
                .map(|_| MetricSeries::new(capacity, 0.0))
                .collect(),
            timestamps: MetricSeries::from_values(seeded)
                .unwrap_or_else(|| MetricSeries::new(capacity, now)),
            power: PowerStatus::default(),
            summary: SystemSummary::default(),
            frames: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.timestamps.capacity()
    }

    /// Appends to a single series.
    ///
    /// Prefer [`push_frame`](Self::push_frame) from the sampler so that all
    /// series stay aligned.
    pub fn append(&mut self, metric: Metric, value: f64) {
        self.series[metric.index()].append(value);
    }

    /// Appends one value to every series and the timestamp series.
    pub fn push_frame(&mut self, frame: &SampleFrame) {
        for metric in Metric::ALL {
            self.series[metric.index()].append(frame.value(metric));
        }
        self.timestamps.append(frame.timestamp);
        self.frames += 1;
    }

    pub fn series(&self, metric: Metric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    /// Ordered copy of one series, most recent last.
    pub fn snapshot(&self, metric: Metric) -> Vec<f64> {
        self.series(metric).snapshot()
    }

    pub fn latest(&self, metric: Metric) -> f64 {
        self.series(metric).latest()
    }

    pub fn timestamps(&self) -> &MetricSeries {
        &self.timestamps
    }

    /// Number of frames pushed since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn power(&self) -> &PowerStatus {
        &self.power
    }

    pub fn set_power(&mut self, power: PowerStatus) {
        self.power = power;
    }

    pub fn summary(&self) -> &SystemSummary {
        &self.summary
    }

    pub fn set_summary(&mut self, summary: SystemSummary) {
        self.summary = summary;
    }
}
