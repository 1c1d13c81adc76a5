//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;

use crate::plugins::PluginEntry;
use crate::storage::HistoryStore;

use super::state::AppState;
use super::style::Styles;
use super::widgets::{render_footer, render_header, render_panels, render_sidebar, sidebar_width};

/// Everything one frame draws. The store is borrowed read-only.
pub struct Dashboard<'a> {
    pub state: &'a AppState,
    pub store: &'a HistoryStore,
    pub plugin_names: Vec<&'a str>,
    pub plugin_entries: &'a [PluginEntry],
}

/// Main render function.
pub fn render(frame: &mut Frame, view: &Dashboard<'_>) {
    let area = frame.area();
    let styles = Styles::new(view.state.theme);
    frame.render_widget(Block::default().style(styles.text()), area);

    let rows = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Spacer
        Constraint::Min(0),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, rows[0], view.state, &styles);

    let body = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(sidebar_width(area.width)),
    ])
    .split(rows[2]);
    render_panels(frame, body[0], view, &styles);
    render_sidebar(frame, body[1], view, &styles);

    render_footer(frame, rows[3], &styles);
}
