//! Sidebar with system stats, plugin stats and the widget list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{human_bytes, percent_or_dash};
use crate::storage::Metric;
use crate::tui::render::Dashboard;
use crate::tui::state::Widget;
use crate::tui::style::Styles;

/// Minimum sidebar width in columns.
pub const MIN_SIDEBAR_WIDTH: u16 = 28;

/// Sidebar width for a terminal `total` columns wide: 22%, at least 28.
pub fn sidebar_width(total: u16) -> u16 {
    let share = (u32::from(total) * 22 / 100) as u16;
    share.max(MIN_SIDEBAR_WIDTH).min(total)
}

fn stat(key: &str, value: String, styles: &Styles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:6} ", key), styles.dim()),
        Span::styled(value, styles.text()),
    ])
}

/// "System" stats in display order.
pub fn system_stats(view: &Dashboard<'_>) -> Vec<(&'static str, String)> {
    let store = view.store;
    let summary = store.summary();
    vec![
        ("CPU", format!("{:.1}%", store.latest(Metric::Cpu))),
        (
            "Temp",
            format!("{:.1}\u{b0}C", store.latest(Metric::Temperature)),
        ),
        ("Mem", percent_or_dash(summary.memory_percent)),
        ("Disk", percent_or_dash(summary.root_disk_percent)),
        (
            "IP",
            summary.ip_address.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Sent",
            summary
                .net_totals
                .map(|n| human_bytes(n.bytes_sent as f64))
                .unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Recv",
            summary
                .net_totals
                .map(|n| human_bytes(n.bytes_recv as f64))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

pub fn sidebar_lines(view: &Dashboard<'_>, styles: &Styles) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(" System ", styles.title()), Line::default()];

    for (key, value) in system_stats(view) {
        lines.push(stat(key, value, styles));
    }

    if !view.plugin_entries.is_empty() {
        lines.push(Line::default());
        for entry in view.plugin_entries {
            let style = if entry.alert {
                styles.danger()
            } else {
                styles.text()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:6} ", entry.label), styles.dim()),
                Span::styled(entry.value.clone(), style),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(Line::styled(" Widgets:", styles.text()));
    for widget in Widget::all() {
        if *widget == view.state.selected {
            lines.push(Line::styled(
                format!("\u{25b6} {}", widget.name()),
                styles.selected(),
            ));
        } else {
            lines.push(Line::styled(format!("  {}", widget.name()), styles.text()));
        }
    }
    lines
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, view: &Dashboard<'_>, styles: &Styles) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(styles.dim());
    let paragraph = Paragraph::new(sidebar_lines(view, styles))
        .block(block)
        .style(styles.text());
    frame.render_widget(paragraph, area);
}
