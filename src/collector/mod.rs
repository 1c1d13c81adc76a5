//! Host telemetry collection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        MetricSource                          │
//! │  ┌─────────────────┐ ┌─────────────────┐ ┌────────────────┐  │
//! │  │ SystemCollector │ │ SensorCollector │ │   Vcgencmd     │  │
//! │  │ - /proc/stat    │ │ - hwmon         │ │ - measure_temp │  │
//! │  │ - /proc/disk..  │ │ - thermal_zone  │ │ - measure_clock│  │
//! │  │ - /proc/net/dev │ └────────┬────────┘ │ - get_throttled│  │
//! │  │ - /proc/meminfo │          │          └───────┬────────┘  │
//! │  └────────┬────────┘          │                  │           │
//! │    ┌──────▼──────────────────▼──┐        ┌──────▼────────┐   │
//! │    │     FileSystem (trait)     │        │ CommandRunner │   │
//! │    └──────┬─────────────────────┘        └──────┬────────┘   │
//! └───────────┼─────────────────────────────────────┼────────────┘
//!      ┌──────┴──────┐                       ┌──────┴───────┐
//!      │ RealFs      │                       │ RealCommands │
//!      │ MockFs      │                       │ MockCommands │
//!      └─────────────┘                       └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use raspimon::collector::{MetricSource, MockCommands, MockFs};
//! use raspimon::collector::mock::FixedUsage;
//!
//! let mut source = MetricSource::new(
//!     MockFs::raspberry_pi(),
//!     MockCommands::raspberry_pi(),
//!     "/proc",
//!     "/sys",
//! )
//! .with_usage_probe(FixedUsage(None));
//! assert_eq!(source.temperature(), Some(48.3));
//! assert_eq!(source.cpu_percent(), Some(0.0));
//! ```

pub mod mock;
pub mod procfs;
pub mod sensors;
mod source;
pub mod traits;
pub mod vcgencmd;

pub use mock::{MockCommands, MockFs};
pub use procfs::CollectError;
pub use source::MetricSource;
pub use traits::{CommandRunner, DiskUsageProbe, FileSystem, RealCommands, RealFs, SysinfoDisks};
