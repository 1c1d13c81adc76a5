//! Color themes and styles.

use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// Bars switch to the warn color above this percentage.
pub const WARN_PERCENT: f64 = 70.0;
/// Bars switch to the danger color above this percentage.
pub const DANGER_PERCENT: f64 = 90.0;

/// Built-in color presets, in cycling order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Solar,
}

impl ThemeName {
    pub fn all() -> &'static [ThemeName] {
        &[ThemeName::Dark, ThemeName::Light, ThemeName::Solar]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Solar => "solar",
        }
    }

    /// Returns the next theme, wrapping around.
    pub fn next(&self) -> ThemeName {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Solar,
            ThemeName::Solar => ThemeName::Dark,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeName::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                warn: Color::Yellow,
                danger: Color::Red,
            },
            ThemeName::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                warn: Color::Magenta,
                danger: Color::Red,
            },
            ThemeName::Solar => Palette {
                fg: Color::Yellow,
                bg: Color::Black,
                accent: Color::Green,
                warn: Color::Magenta,
                danger: Color::Red,
            },
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown theme '{s}' (expected dark, light or solar)"))
    }
}

/// The five colors of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub warn: Color,
    pub danger: Color,
}

/// Styles derived from the active palette.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    palette: Palette,
}

impl Styles {
    pub fn new(theme: ThemeName) -> Self {
        Self {
            palette: theme.palette(),
        }
    }

    /// Default text style.
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg)
    }

    /// Panel titles and the header line.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .bg(self.palette.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.palette.accent).bg(self.palette.bg)
    }

    pub fn warn(&self) -> Style {
        Style::default().fg(self.palette.warn).bg(self.palette.bg)
    }

    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.palette.danger)
            .bg(self.palette.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Bar color for a percentage.
    pub fn level(&self, pct: f64) -> Style {
        if pct > DANGER_PERCENT {
            self.danger()
        } else if pct > WARN_PERCENT {
            self.warn()
        } else {
            self.accent()
        }
    }

    /// Selected widget marker.
    pub fn selected(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        self.text().add_modifier(Modifier::DIM)
    }

    /// Key names in the footer.
    pub fn help_key(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }
}
