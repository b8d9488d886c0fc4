//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level as a `tracing` filter directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_lowercase() {
        let config: LoggingConfig = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.level.as_directive(), "warn");
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(toml::from_str::<LoggingConfig>("level = \"loud\"").is_err());
    }
}
