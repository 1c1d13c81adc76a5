//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::AppState;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Rebuild the plugin registry from disk.
    ReloadPlugins,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Right | KeyCode::Char('l') => {
            state.select_next();
            KeyAction::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.select_prev();
            KeyAction::None
        }
        KeyCode::Char('t') => {
            state.cycle_theme();
            KeyAction::None
        }
        KeyCode::Char('r') => KeyAction::ReloadPlugins,

        // Reserved.
        KeyCode::Char('p') => KeyAction::None,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::Widget;
    use crate::tui::style::ThemeName;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = AppState::new(ThemeName::Dark);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('Q'))), KeyAction::Quit);
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handle_key(&mut state, ctrl_c), KeyAction::Quit);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('c'))), KeyAction::None);
    }

    #[test]
    fn widget_navigation_wraps() {
        let mut state = AppState::new(ThemeName::Dark);
        handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.selected, Widget::Plugins);
        handle_key(&mut state, key(KeyCode::Char('l')));
        assert_eq!(state.selected, Widget::Cpu);
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.selected, Widget::Temp);
        handle_key(&mut state, key(KeyCode::Char('h')));
        assert_eq!(state.selected, Widget::Cpu);
    }

    #[test]
    fn theme_and_reload() {
        let mut state = AppState::new(ThemeName::Dark);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('t'))), KeyAction::None);
        assert_eq!(state.theme, ThemeName::Light);
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('r'))),
            KeyAction::ReloadPlugins
        );
    }

    #[test]
    fn reserved_and_release_ignored() {
        let mut state = AppState::new(ThemeName::Dark);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('p'))), KeyAction::None);
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..key(KeyCode::Char('q'))
        };
        assert_eq!(handle_key(&mut state, release), KeyAction::None);
        assert_eq!(state.selected, Widget::Cpu);
        assert_eq!(state.theme, ThemeName::Dark);
    }
}
