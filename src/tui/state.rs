//! Application state management.

use super::style::ThemeName;

/// Dashboard widgets listed in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Widget {
    #[default]
    Cpu,
    Temp,
    Net,
    SdIo,
    Gpu,
    FanPower,
    Plugins,
}

impl Widget {
    pub fn all() -> &'static [Widget] {
        &[
            Widget::Cpu,
            Widget::Temp,
            Widget::Net,
            Widget::SdIo,
            Widget::Gpu,
            Widget::FanPower,
            Widget::Plugins,
        ]
    }

    /// Returns the display name of the widget.
    pub fn name(&self) -> &'static str {
        match self {
            Widget::Cpu => "CPU",
            Widget::Temp => "Temp",
            Widget::Net => "Net",
            Widget::SdIo => "SD IO",
            Widget::Gpu => "GPU",
            Widget::FanPower => "Fan/Power",
            Widget::Plugins => "Plugins",
        }
    }

    fn position(&self) -> usize {
        Widget::all().iter().position(|w| w == self).unwrap_or(0)
    }

    /// Returns the next widget, wrapping around.
    pub fn next(&self) -> Widget {
        let all = Widget::all();
        all[(self.position() + 1) % all.len()]
    }

    /// Returns the previous widget, wrapping around.
    pub fn prev(&self) -> Widget {
        let all = Widget::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

/// View state driven by keyboard input.
#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: ThemeName,
    pub selected: Widget,
}

impl AppState {
    pub fn new(theme: ThemeName) -> Self {
        Self {
            theme,
            selected: Widget::default(),
        }
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.prev();
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_wraps_both_ways() {
        assert_eq!(Widget::Plugins.next(), Widget::Cpu);
        assert_eq!(Widget::Cpu.prev(), Widget::Plugins);
        assert_eq!(Widget::Net.next(), Widget::SdIo);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut state = AppState::new(ThemeName::Dark);
        for _ in 0..Widget::all().len() {
            state.select_next();
        }
        assert_eq!(state.selected, Widget::Cpu);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, Widget::FanPower);
    }

    #[test]
    fn test_cycle_theme() {
        let mut state = AppState::new(ThemeName::Solar);
        state.cycle_theme();
        assert_eq!(state.theme, ThemeName::Dark);
    }
}
