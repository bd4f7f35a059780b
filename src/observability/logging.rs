//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub directive: String,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging configuration from config settings with env overrides.
    ///
    /// `RUST_LOG` wins over the configured level; `verbose` raises the
    /// default to `debug`.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        Self::resolve(settings, verbose, |key| std::env::var(key).ok())
    }

    fn resolve(
        settings: &LoggingSettings,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let default_level = if verbose { "debug" } else { "info" };
        let directive = lookup("RUST_LOG")
            .or_else(|| settings.level.clone())
            .unwrap_or_else(|| default_level.to_string());
        let format = lookup("MOVIEGRAPH_LOG_FORMAT")
            .or_else(|| settings.format.clone())
            .map(|f| LogFormat::parse(&f))
            .unwrap_or_default();
        let file = lookup("MOVIEGRAPH_LOG_FILE")
            .map(PathBuf::from)
            .or_else(|| settings.file.clone());

        Self {
            directive,
            format,
            file,
        }
    }
}
