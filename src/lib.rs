//! raspimon - terminal dashboard for Raspberry Pi and Linux host telemetry.
//!
//! The sampling engine (`collector`, `rates`, `storage`, `sampler`) is
//! independent of the terminal; `tui` only reads the history store.

pub mod collector;
pub mod config;
pub mod fmt;
pub mod plugins;
pub mod rates;
pub mod sampler;
pub mod sparkline;
pub mod storage;
pub mod tui;
