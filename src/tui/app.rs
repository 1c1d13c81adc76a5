//! Main TUI application.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{error, info};

use crate::collector::{CommandRunner, FileSystem, MetricSource};
use crate::config::Config;
use crate::plugins::{PluginEntry, PluginRegistry};
use crate::sampler::Sampler;
use crate::storage::HistoryStore;

use super::input::{KeyAction, handle_key};
use super::render::{Dashboard, render};
use super::state::AppState;
use super::widgets::render_fatal;

/// Input poll timeout; also the idle sleep between loop iterations.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// How long the fatal error screen stays up.
const FATAL_PAUSE: Duration = Duration::from_secs(2);

/// Error that ends the main loop.
#[derive(Debug)]
pub enum AppError {
    /// Drawing to or reading from the terminal failed.
    Terminal(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Terminal(_) => write!(f, "terminal I/O failed"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Terminal(e) => Some(e),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Terminal(e)
    }
}

fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Main TUI application.
pub struct App<F: FileSystem + Clone, C: CommandRunner + Clone> {
    fs: F,
    sampler: Sampler<F, C>,
    store: HistoryStore,
    plugins: PluginRegistry,
    /// Sidebar plugin values, refreshed once per tick.
    plugin_entries: Vec<PluginEntry>,
    state: AppState,
    shutdown: Arc<AtomicBool>,
}

impl<F: FileSystem + Clone, C: CommandRunner + Clone> App<F, C> {
    /// Creates the application.
    ///
    /// `fs` is used for plugin manifests and plugin stat files; `shutdown`
    /// stops the loop when set from another thread (signal handler).
    pub fn new(
        source: MetricSource<F, C>,
        fs: F,
        config: &Config,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let plugins = PluginRegistry::load(config.plugins_dir.clone(), &fs);
        let store = HistoryStore::new(config.history_len, config.refresh, unix_now());
        let plugin_entries = plugins.sidebar_entries(&fs, &store);
        Self {
            sampler: Sampler::new(source, config, Instant::now()),
            store,
            plugins,
            plugin_entries,
            state: AppState::new(config.theme),
            fs,
            shutdown,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn plugin_entries(&self) -> &[PluginEntry] {
        &self.plugin_entries
    }

    pub fn should_quit(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Samples if a tick is due at `now`. Plugin stat files are re-read
    /// only when a tick ran.
    pub fn sample(&mut self, now: Instant) -> bool {
        let ticked = self.sampler.poll(now, &mut self.store);
        if ticked {
            self.refresh_plugin_entries();
        }
        ticked
    }

    fn refresh_plugin_entries(&mut self) {
        self.plugin_entries = self.plugins.sidebar_entries(&self.fs, &self.store);
    }

    /// Applies a key action.
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.shutdown.store(true, Ordering::SeqCst),
            KeyAction::ReloadPlugins => {
                self.plugins.reload(&self.fs);
                self.refresh_plugin_entries();
                info!(count = self.plugins.plugins().len(), "plugins reloaded");
            }
            KeyAction::None => {}
        }
    }

    /// Draws one frame.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let view = Dashboard {
            state: &self.state,
            store: &self.store,
            plugin_names: self.plugins.names(),
            plugin_entries: &self.plugin_entries,
        };
        terminal.draw(|frame| render(frame, &view))?;
        Ok(())
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        while !self.should_quit() {
            self.sample(Instant::now());
            self.draw(terminal)?;

            if event::poll(INPUT_POLL)?
                && let Event::Key(key) = event::read()?
            {
                let action = handle_key(&mut self.state, key);
                self.apply(action);
            }
        }
        Ok(())
    }

    /// Runs the TUI application until quit.
    ///
    /// A terminal failure inside the loop is shown full-screen for two
    /// seconds before the terminal is restored and the error returned.
    pub fn run(mut self) -> Result<(), AppError> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!(
            period_ms = self.sampler.period().as_millis() as u64,
            history = self.store.capacity(),
            plugins = self.plugins.plugins().len(),
            "dashboard started"
        );

        let result = self.event_loop(&mut terminal);

        if let Err(e) = &result {
            error!(error = %e, "main loop failed");
            let _ = terminal.draw(|frame| render_fatal(frame, e));
            thread::sleep(FATAL_PAUSE);
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}
