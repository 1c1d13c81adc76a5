//! raspimon - terminal dashboard for host telemetry.

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use raspimon::collector::{CommandRunner, FileSystem, MetricSource, RealCommands, RealFs};
use raspimon::config::Config;
use raspimon::rates::DtMode;
use raspimon::tui::{App, ThemeName};

/// Terminal dashboard for CPU, temperature, network, disk and GPU telemetry.
#[derive(Parser)]
#[command(name = "raspimon", about = "Terminal dashboard for host telemetry", version)]
struct Args {
    /// Sampling interval in milliseconds.
    #[arg(value_name = "INTERVAL_MS", default_value_t = 400)]
    interval_ms: u64,

    /// Number of samples kept per metric.
    #[arg(long, default_value_t = 120)]
    history: usize,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Path to /sys filesystem (for testing/mocking).
    #[arg(long, default_value = "/sys")]
    sys_path: String,

    /// Directory with *.toml plugin manifests.
    #[arg(long, default_value = "plugins")]
    plugins_dir: PathBuf,

    /// Starting color theme (dark, light, solar).
    #[arg(long, default_value = "dark")]
    theme: ThemeName,

    /// Divide counter deltas by the measured time between samples instead
    /// of the nominal interval.
    #[arg(long)]
    measured_dt: bool,

    /// Write logs to this file. The dashboard owns the terminal, so logs are
    /// discarded when no file is given.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            refresh: Duration::from_millis(self.interval_ms),
            history_len: self.history,
            proc_path: self.proc_path.clone(),
            sys_path: self.sys_path.clone(),
            plugins_dir: self.plugins_dir.clone(),
            theme: self.theme,
            dt_mode: if self.measured_dt {
                DtMode::Measured
            } else {
                DtMode::Nominal
            },
        }
    }
}

/// Initializes the tracing subscriber writing to `log_file`.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&PathBuf>) -> Result<(), String> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run<F, C>(fs: F, commands: C, config: &Config) -> Result<(), raspimon::tui::AppError>
where
    F: FileSystem + Clone + 'static,
    C: CommandRunner + Clone + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let s = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        s.store(true, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let source = MetricSource::new(
        fs.clone(),
        commands,
        config.proc_path.clone(),
        config.sys_path.clone(),
    );
    App::new(source, fs, config, shutdown).run()
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_ref()) {
        eprintln!("raspimon: cannot open log file {}", e);
        std::process::exit(1);
    }

    let config = match args.config().validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("raspimon: {}", e);
            std::process::exit(1);
        }
    };
    info!(?config, "starting");

    // Hosts without /proc or vcgencmd show those metrics as absent.
    if let Err(e) = run(RealFs::new(), RealCommands::new(), &config) {
        let mut message = format!("raspimon: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        eprintln!("{}", message);
        std::process::exit(1);
    }
}
