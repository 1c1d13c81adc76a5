//! Key hint line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;

const HINTS: [(&str, &str); 4] = [
    ("\u{2190}/\u{2192}", "switch widget"),
    ("t", "toggle theme"),
    ("q", "quit"),
    ("r", "reload plugins"),
];

pub fn render_footer(frame: &mut Frame, area: Rect, styles: &Styles) {
    let mut spans = vec![Span::styled(" ", styles.text())];
    for (i, (key, action)) in HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", styles.dim()));
        }
        spans.push(Span::styled(*key, styles.help_key()));
        spans.push(Span::styled(format!(" {action}"), styles.text()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(styles.text()), area);
}
