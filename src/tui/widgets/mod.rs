//! TUI widgets for raspimon.

mod fatal;
mod footer;
mod header;
mod panels;
mod sidebar;

pub use fatal::render_fatal;
pub use footer::render_footer;
pub use header::render_header;
pub use panels::render_panels;
pub use sidebar::{render_sidebar, sidebar_width};
