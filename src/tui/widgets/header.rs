//! Header line with version, theme and local time.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::Styles;

pub fn title(state: &AppState) -> String {
    format!(
        " Raspimon {} \u{2022} Theme: {} ",
        env!("CARGO_PKG_VERSION"),
        state.theme.name()
    )
}

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let chunks = Layout::horizontal([
        Constraint::Min(20),    // Title
        Constraint::Length(10), // Time
    ])
    .split(area);

    frame.render_widget(Paragraph::new(title(state)).style(styles.title()), chunks[0]);

    let time = Local::now().format("%H:%M:%S ").to_string();
    frame.render_widget(
        Paragraph::new(time)
            .style(styles.dim())
            .alignment(ratatui::layout::Alignment::Right),
        chunks[1],
    );
}
