//! Terminal user interface for raspimon.
//!
//! A single-page dashboard: metric panels with sparklines on the left, a
//! stats sidebar on the right. The main loop samples, draws and polls input
//! on one thread.

mod app;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::{App, AppError};
pub use input::{KeyAction, handle_key};
pub use state::{AppState, Widget};
pub use style::{Palette, Styles, ThemeName};
