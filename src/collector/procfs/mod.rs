//! Collectors for the Linux `/proc` filesystem.
//!
//! This module provides parsers and a collector for reading CPU, memory,
//! block device and network counters from the `/proc` virtual filesystem.

pub mod parser;
pub mod system;

pub use parser::{CpuTimes, MemInfo, ParseError};
pub use system::{CollectError, SystemCollector};
