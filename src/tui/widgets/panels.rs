//! Main area: one panel per dashboard widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::collector::vcgencmd::parse_throttled;
use crate::fmt::{clamp, human_rate};
use crate::sparkline::{bar, sparkline};
use crate::storage::Metric;
use crate::tui::render::Dashboard;
use crate::tui::state::Widget;
use crate::tui::style::Styles;

/// Widest sparkline drawn.
pub const MAX_SPARK_WIDTH: usize = 60;
const GPU_BAR_WIDTH: usize = 20;

/// Sparkline width for a main area `main_width` columns wide.
pub fn spark_width(main_width: u16) -> usize {
    MAX_SPARK_WIDTH.min((main_width as usize).saturating_sub(6))
}

fn title(widget: Widget, text: &str, view: &Dashboard<'_>, styles: &Styles) -> Line<'static> {
    if view.state.selected == widget {
        Line::from(vec![
            Span::styled(text.to_string(), styles.selected()),
            Span::styled(" \u{25c0}", styles.selected()),
        ])
    } else {
        Line::from(Span::styled(text.to_string(), styles.title()))
    }
}

fn bar_line(pct: f64, width: usize, suffix: String, styles: &Styles) -> Line<'static> {
    Line::from(vec![
        Span::styled(bar(pct, width), styles.level(pct)),
        Span::styled(suffix, styles.text()),
    ])
}

fn rate_line(
    prefix: &str,
    view: &Dashboard<'_>,
    metric: Metric,
    width: usize,
    styles: &Styles,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(prefix.to_string(), styles.text()),
        Span::styled(sparkline(&view.store.snapshot(metric), width), styles.accent()),
        Span::styled(format!(" {}", human_rate(view.store.latest(metric))), styles.text()),
    ])
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Builds the main area content.
pub fn main_lines(view: &Dashboard<'_>, styles: &Styles, main_width: u16) -> Vec<Line<'static>> {
    let width = spark_width(main_width);
    let store = view.store;
    let mut lines = Vec::new();

    let cpu = store.latest(Metric::Cpu);
    lines.push(title(Widget::Cpu, "CPU", view, styles));
    lines.push(Line::styled(
        sparkline(&store.snapshot(Metric::Cpu), width),
        styles.accent(),
    ));
    lines.push(bar_line(cpu, width, format!(" {:5.1}%", cpu), styles));
    lines.push(Line::default());

    let gpu = store.latest(Metric::Gpu);
    lines.push(title(Widget::Gpu, "GPU", view, styles));
    lines.push(bar_line(gpu, GPU_BAR_WIDTH, format!(" {:4.0}%", gpu), styles));
    lines.push(Line::default());

    let temp = store.latest(Metric::Temperature);
    lines.push(title(Widget::Temp, "Temperature", view, styles));
    lines.push(Line::styled(
        sparkline(&store.snapshot(Metric::Temperature), width),
        styles.accent(),
    ));
    lines.push(bar_line(
        clamp(temp, 0.0, 100.0),
        width,
        format!(" {:5.1}\u{b0}C", temp),
        styles,
    ));
    lines.push(Line::default());

    lines.push(title(Widget::SdIo, "SD Card R/W", view, styles));
    lines.push(rate_line("R:", view, Metric::DiskRead, width, styles));
    lines.push(rate_line("W:", view, Metric::DiskWrite, width, styles));
    lines.push(Line::default());

    lines.push(title(Widget::Net, "Network (rates)", view, styles));
    lines.push(rate_line("\u{2193}:", view, Metric::NetIn, width, styles));
    lines.push(rate_line("\u{2191}:", view, Metric::NetOut, width, styles));
    lines.push(Line::default());

    let power = store.power();
    lines.push(title(Widget::FanPower, "Fan / Power", view, styles));
    let throttled = power.throttled.as_deref().and_then(parse_throttled);
    lines.push(Line::styled(
        format!("Throttled: {}", or_dash(power.throttled.as_deref())),
        if throttled.is_some_and(|flags| flags != 0) {
            styles.danger()
        } else {
            styles.text()
        },
    ));
    lines.push(Line::styled(
        format!("Volts: {}", or_dash(power.volts.as_deref())),
        styles.text(),
    ));
    lines.push(Line::default());

    lines.push(title(Widget::Plugins, "Plugins Loaded:", view, styles));
    let names = if view.plugin_names.is_empty() {
        "(none)".to_string()
    } else {
        view.plugin_names.join(", ")
    };
    lines.push(Line::styled(names, styles.text()));

    lines
}

pub fn render_panels(frame: &mut Frame, area: Rect, view: &Dashboard<'_>, styles: &Styles) {
    let inner = Rect {
        x: area.x.saturating_add(2),
        width: area.width.saturating_sub(2),
        ..area
    };
    let lines = main_lines(view, styles, area.width);
    frame.render_widget(Paragraph::new(lines).style(styles.text()), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::model::PowerStatus;
    use crate::storage::HistoryStore;
    use crate::tui::state::AppState;
    use crate::tui::style::ThemeName;
    use std::time::Duration;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_spark_width() {
        assert_eq!(spark_width(200), 60);
        assert_eq!(spark_width(40), 34);
        assert_eq!(spark_width(3), 0);
    }

    #[test]
    fn test_main_lines_content() {
        let mut store = HistoryStore::new(120, Duration::from_millis(400), 0.0);
        store.append(Metric::Cpu, 50.0);
        store.append(Metric::Gpu, 83.3);
        store.append(Metric::NetIn, 1536.0);
        store.set_power(PowerStatus {
            throttled: Some("throttled=0x0".into()),
            volts: None,
        });
        let state = AppState::new(ThemeName::Dark);
        let view = Dashboard {
            state: &state,
            store: &store,
            plugin_names: vec![],
            plugin_entries: &[],
        };
        let styles = Styles::new(state.theme);
        let lines: Vec<String> = main_lines(&view, &styles, 40).iter().map(text).collect();

        assert_eq!(lines[0], "CPU \u{25c0}");
        assert_eq!(lines[1].chars().count(), 34);
        assert!(lines[2].ends_with("  50.0%"));
        assert_eq!(lines[5], format!("{}   83%", "\u{2588}".repeat(16) + "    "));
        assert!(lines.iter().any(|l| l.starts_with("\u{2193}:") && l.ends_with(" 1.5KB/s")));
        assert!(lines.contains(&"Throttled: throttled=0x0".to_string()));
        assert!(lines.contains(&"Volts: -".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("(none)"));
    }
}
