//! Full-screen error report shown before exiting.

use std::error::Error;

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// The error and its source chain, one line each.
pub fn error_lines(error: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("raspimon: {error}")];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines
}

pub fn render_fatal(frame: &mut Frame, error: &dyn Error) {
    let area = frame.area();
    let mut lines: Vec<Line> = error_lines(error)
        .into_iter()
        .take(area.height.saturating_sub(1) as usize)
        .map(Line::from)
        .collect();
    if let Some(first) = lines.first_mut() {
        first.style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    }
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::AppError;
    use std::io;

    #[test]
    fn includes_source_chain() {
        let err = AppError::Terminal(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        let lines = error_lines(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("raspimon: terminal"));
        assert_eq!(lines[1], "  caused by: pipe closed");
    }
}
