//! Text sparklines and bars.

/// Glyph ramp from lowest to highest.
pub const RAMP: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const FULL_BLOCK: char = '█';

/// Render `samples` as exactly `width` glyphs.
///
/// Samples are normalised against the min/max of the whole slice and
/// down-sampled with a fixed stride. When the stride leaves more glyphs than
/// `width`, the most recent ones are kept; when it leaves fewer, the line is
/// right-aligned with leading spaces.
pub fn sparkline(samples: &[f64], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if samples.is_empty() {
        return " ".repeat(width);
    }

    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = if hi == lo { 1.0 } else { hi - lo };
    let stride = (samples.len() / width).max(1);
    let top = (RAMP.len() - 1) as f64;

    let glyphs: Vec<char> = samples
        .iter()
        .step_by(stride)
        .map(|v| {
            let norm = (v - lo) / range;
            if !norm.is_finite() {
                return RAMP[0];
            }
            let idx = (norm * top).floor().clamp(0.0, top) as usize;
            RAMP[idx]
        })
        .collect();

    let keep = &glyphs[glyphs.len().saturating_sub(width)..];
    let mut line = " ".repeat(width - keep.len());
    line.extend(keep);
    line
}

/// Horizontal bar of `width` cells, `pct` percent filled.
pub fn bar(pct: f64, width: usize) -> String {
    let filled = if pct.is_finite() {
        ((pct / 100.0) * width as f64).floor().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    let mut line: String = std::iter::repeat_n(FULL_BLOCK, filled).collect();
    line.push_str(&" ".repeat(width - filled));
    line
}
