//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that summaries printed on stdout stay clean.
//! `RUST_LOG` is honoured unless a level was requested explicitly.

use crate::error::EngineError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
    /// Let `RUST_LOG` override `level`.
    pub use_env_filter: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: LevelFilter::WARN, format: LogFormat::default(), use_env_filter: true }
    }
}

impl LogConfig {
    /// - 0 (no `-v`): warn, `RUST_LOG` may override
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self { level, use_env_filter: verbosity == 0, ..Self::default() }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        if self.use_env_filter {
            EnvFilter::builder().with_default_directive(self.level.into()).from_env_lossy()
        } else {
            EnvFilter::new(self.level.to_string())
        }
    }
}

pub fn init_logging(config: &LogConfig) -> Result<(), EngineError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr);
    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| EngineError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity() {
        let quiet = LogConfig::from_verbosity(0);
        assert_eq!(quiet.level, LevelFilter::WARN);
        assert!(quiet.use_env_filter);

        let debug = LogConfig::from_verbosity(2);
        assert_eq!(debug.level, LevelFilter::DEBUG);
        assert!(!debug.use_env_filter);

        assert_eq!(LogConfig::from_verbosity(9).level, LevelFilter::TRACE);
    }

    #[test]
    fn test_with_format() {
        let config = LogConfig::from_verbosity(1).with_format(LogFormat::Json);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LevelFilter::INFO);
    }
}
