//! Logging setup.
//!
//! The simulator logs to stdout by default so that state changes show up
//! directly in test-run output. Long-lived runs can switch to rolling log
//! files via `--log-dir`.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Rotation period for log files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPeriod {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl std::str::FromStr for RotationPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutely" | "minute" => Ok(RotationPeriod::Minutely),
            "hourly" | "hour" => Ok(RotationPeriod::Hourly),
            "daily" | "day" => Ok(RotationPeriod::Daily),
            "never" | "none" => Ok(RotationPeriod::Never),
            _ => Err(format!(
                "Invalid rotation period '{}'. Valid options: minutely, hourly, daily, never",
                s
            )),
        }
    }
}

impl From<RotationPeriod> for Rotation {
    fn from(period: RotationPeriod) -> Self {
        match period {
            RotationPeriod::Minutely => Rotation::MINUTELY,
            RotationPeriod::Hourly => Rotation::HOURLY,
            RotationPeriod::Daily => Rotation::DAILY,
            RotationPeriod::Never => Rotation::NEVER,
        }
    }
}

/// Configuration for file-based logging.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory where log files are written.
    pub log_dir: String,
    /// Prefix for log file names.
    pub log_prefix: String,
    /// How often to rotate log files.
    pub rotation: RotationPeriod,
    /// Maximum number of rotated files to keep.
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: ".".to_string(),
            log_prefix: "lightbulb-sim".to_string(),
            rotation: RotationPeriod::Daily,
            max_log_files: 7,
        }
    }
}

/// Guard that must be kept alive for the duration of the program; dropping
/// it flushes any buffered log lines.
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Filter from `RUST_LOG`, defaulting to `info` when unset. The default
/// matters: the state-change lines are the fixture's visible output.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Set up console logging (stdout).
pub fn setup_console_logging() -> LogGuard {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .init();

    LogGuard { _guards: vec![] }
}

/// Set up file-based logging with rotation.
///
/// Files are named `<prefix>.<date>.log` inside `config.log_dir`; retention
/// beyond `max_log_files` is handled by the appender.
pub fn setup_file_logging(config: LogConfig) -> std::io::Result<LogGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(&config.log_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_log_files)
        .build(Path::new(&config.log_dir))
        .map_err(std::io::Error::other)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = Layer::default()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _guards: vec![guard],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_period_from_str() {
        assert_eq!(
            "minutely".parse::<RotationPeriod>().unwrap(),
            RotationPeriod::Minutely
        );
        assert_eq!(
            "hour".parse::<RotationPeriod>().unwrap(),
            RotationPeriod::Hourly
        );
        assert_eq!(
            "Daily".parse::<RotationPeriod>().unwrap(),
            RotationPeriod::Daily
        );
        assert_eq!(
            "never".parse::<RotationPeriod>().unwrap(),
            RotationPeriod::Never
        );
        assert!("weekly".parse::<RotationPeriod>().is_err());
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_dir, ".");
        assert_eq!(config.log_prefix, "lightbulb-sim");
        assert_eq!(config.rotation, RotationPeriod::Daily);
        assert_eq!(config.max_log_files, 7);
    }
}
