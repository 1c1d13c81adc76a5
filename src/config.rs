//! Runtime configuration shared by the sampler and the TUI.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::rates::DtMode;
use crate::storage::DEFAULT_HISTORY_LEN;
use crate::tui::ThemeName;

/// Default sampling period.
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(400);

/// Error returned by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRefresh,
    ZeroHistory,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroRefresh => write!(f, "refresh interval must be greater than zero"),
            ConfigError::ZeroHistory => write!(f, "history length must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sampling period.
    pub refresh: Duration,
    /// Samples retained per metric.
    pub history_len: usize,
    pub proc_path: String,
    pub sys_path: String,
    /// Directory scanned for `*.toml` plugin manifests.
    pub plugins_dir: PathBuf,
    /// Theme shown at startup.
    pub theme: ThemeName,
    pub dt_mode: DtMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
            history_len: DEFAULT_HISTORY_LEN,
            proc_path: "/proc".to_string(),
            sys_path: "/sys".to_string(),
            plugins_dir: PathBuf::from("plugins"),
            theme: ThemeName::default(),
            dt_mode: DtMode::default(),
        }
    }
}

impl Config {
    /// Checks the settings the sampling engine cannot work without.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.refresh.is_zero() {
            return Err(ConfigError::ZeroRefresh);
        }
        if self.history_len == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh, Duration::from_millis(400));
        assert_eq!(config.history_len, 120);
        assert_eq!(config.plugins_dir, PathBuf::from("plugins"));
        assert_eq!(config.theme, ThemeName::Dark);
        assert_eq!(config.dt_mode, DtMode::Nominal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_values() {
        let zero_refresh = Config {
            refresh: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(zero_refresh.validate(), Err(ConfigError::ZeroRefresh));

        let zero_history = Config {
            history_len: 0,
            ..Default::default()
        };
        let err = zero_history.validate().unwrap_err();
        assert_eq!(err.to_string(), "history length must be at least 1");
    }
}
