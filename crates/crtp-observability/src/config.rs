//! Logging configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    pub level: String,

    /// Console log format
    pub format: LogFormat,

    /// Base directory for log files (file-logging feature)
    pub log_dir: Option<PathBuf>,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
            log_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Check the level names a known tracing level
    pub fn validate(&self) -> Result<(), String> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}
