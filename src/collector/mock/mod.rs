//! Mock platform implementations for testing.
//!
//! This module provides `MockFs`, `MockCommands`, `FixedUsage` and
//! pre-built scenarios for exercising collectors without a Raspberry Pi.

mod commands;
mod filesystem;
mod scenarios;

pub use commands::{FixedUsage, MockCommands};
pub use filesystem::MockFs;
pub use scenarios::{diskstats_line, net_dev_table};
