//! Value formatting for the dashboard.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024 steps, e.g. `512.0B`, `1.5KB`.
///
/// Values past the terabyte range are shown in `PB`. Negative and
/// non-finite inputs are shown as `0.0B`.
pub fn human_bytes(bytes: f64) -> String {
    let mut n = if bytes.is_finite() && bytes > 0.0 {
        bytes
    } else {
        0.0
    };
    for unit in UNITS {
        if n < 1024.0 {
            return format!("{:.1}{}", n, unit);
        }
        n /= 1024.0;
    }
    format!("{:.1}PB", n)
}

/// Format a bytes-per-second rate, e.g. `1.5KB/s`.
pub fn human_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", human_bytes(bytes_per_sec))
}

/// Clamp `v` into `[lo, hi]`, mapping NaN to `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.max(lo).min(hi) }
}

/// Format an optional percentage, `-` when absent.
pub fn percent_or_dash(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "-".to_string(),
    }
}
