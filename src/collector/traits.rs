//! Abstractions over the platform so collectors can be exercised in tests.
//!
//! The `FileSystem` trait covers `/proc` and `/sys` reads, `CommandRunner`
//! covers external diagnostic tools (`vcgencmd`, `hostname`), and
//! `DiskUsageProbe` covers filesystem capacity queries.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use sysinfo::Disks;

/// Abstraction for filesystem operations.
///
/// This trait allows collectors to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    ///
    /// Order is unspecified; callers that need determinism must sort.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

/// Abstraction for running external diagnostic commands.
///
/// Implementations never fail loudly: a missing binary, a nonzero exit
/// status or undecodable output all surface as `None`.
pub trait CommandRunner: Send + Sync {
    /// Returns `true` if `program` can be found on `PATH`.
    fn available(&self, program: &str) -> bool;

    /// Runs `program` with `args` and returns its trimmed standard output.
    ///
    /// Returns `None` when the command cannot be spawned, exits with a
    /// nonzero status, or prints something that is not UTF-8. Empty output
    /// is also reported as `None`.
    fn output(&self, program: &str, args: &[&str]) -> Option<String>;
}

/// Runs commands through `std::process::Command`.
///
/// There is no timeout: a hung binary blocks the caller until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealCommands;

impl RealCommands {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealCommands {
    fn available(&self, program: &str) -> bool {
        let Some(path_var) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path_var).any(|dir| dir.join(program).is_file())
    }

    fn output(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Abstraction for filesystem capacity queries.
pub trait DiskUsageProbe: Send + Sync {
    /// Returns the used share of the filesystem mounted at `mount`, in percent.
    fn used_percent(&self, mount: &Path) -> Option<f64>;
}

/// Capacity probe backed by `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoDisks;

impl DiskUsageProbe for SysinfoDisks {
    fn used_percent(&self, mount: &Path) -> Option<f64> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks.iter().find(|d| d.mount_point() == mount)?;
        let total = disk.total_space();
        if total == 0 {
            return None;
        }
        let used = total.saturating_sub(disk.available_space());
        Some(used as f64 / total as f64 * 100.0)
    }
}
