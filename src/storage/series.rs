//! Fixed-capacity ring buffer of samples.

/// Rolling series of `f64` samples.
///
/// Always holds exactly `capacity` values: construction pre-fills the buffer
/// and every append overwrites the oldest slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    buf: Vec<f64>,
    /// Slot the next append writes to; also the oldest sample.
    head: usize,
}

impl MetricSeries {
    /// Creates a series of `capacity` copies of `fill`. A zero capacity is
    /// raised to 1.
    pub fn new(capacity: usize, fill: f64) -> Self {
        Self {
            buf: vec![fill; capacity.max(1)],
            head: 0,
        }
    }

    /// Creates a series from `values`, oldest first.
    ///
    /// Returns `None` for an empty input.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            buf: values,
            head: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Same as [`capacity`](Self::capacity); a series is never partially
    /// filled.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn append(&mut self, value: f64) {
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.buf.len();
    }

    /// Most recent sample.
    pub fn latest(&self) -> f64 {
        let idx = (self.head + self.buf.len() - 1) % self.buf.len();
        self.buf[idx]
    }

    /// Samples oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    /// Ordered copy of the samples, most recent last.
    pub fn snapshot(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled() {
        let s = MetricSeries::new(4, 0.0);
        assert_eq!(s.len(), 4);
        assert_eq!(s.snapshot(), vec![0.0; 4]);
        assert_eq!(s.latest(), 0.0);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut s = MetricSeries::new(0, 0.0);
        assert_eq!(s.capacity(), 1);
        s.append(3.0);
        s.append(4.0);
        assert_eq!(s.snapshot(), vec![4.0]);
    }

    #[test]
    fn test_keeps_last_capacity_values() {
        for capacity in [1usize, 2, 3, 7, 120] {
            for appends in [capacity, capacity + 1, 2 * capacity + 3] {
                let mut s = MetricSeries::new(capacity, 0.0);
                for i in 0..appends {
                    s.append(i as f64);
                }
                let expected: Vec<f64> = (appends - capacity..appends).map(|i| i as f64).collect();
                assert_eq!(s.snapshot(), expected, "capacity {capacity} appends {appends}");
                assert_eq!(s.latest(), (appends - 1) as f64);
            }
        }
    }

    #[test]
    fn test_single_append_over_placeholders() {
        let mut s = MetricSeries::new(120, 0.0);
        s.append(42.5);
        let snap = s.snapshot();
        assert_eq!(snap.len(), 120);
        assert_eq!(snap[119], 42.5);
        assert!(snap[..119].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut s = MetricSeries::new(3, 0.0);
        s.append(1.0);
        let a = s.snapshot();
        let b = s.snapshot();
        assert_eq!(a, b);
        assert_eq!(s.latest(), 1.0);
    }

    #[test]
    fn test_from_values() {
        assert!(MetricSeries::from_values(vec![]).is_none());
        let mut s = MetricSeries::from_values(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.latest(), 3.0);
        s.append(4.0);
        assert_eq!(s.snapshot(), vec![2.0, 3.0, 4.0]);
    }
}
