// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always installed. With the `file-logging` feature and a
//! configured `log_dir`, a JSON log file is also written to a timestamped run
//! folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── crtp-link.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps log writers alive; flushes on drop
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the filter for the given flags and configuration
pub fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level.to_ascii_lowercase());
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))
}

/// Initialize the global subscriber
///
/// Fails if the filter is invalid, the log folder cannot be created, or a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(build_filter(debug_flags, config)?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(build_filter(debug_flags, config)?)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.log_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file_layer(base, build_filter(debug_flags, config)?)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };

    #[cfg(not(feature = "file-logging"))]
    let log_dir = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize logging from process arguments, `CRTP_DEBUG` and defaults
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&crate::cli::parse_debug_flags(), &LoggingConfig::default())
}

#[cfg(feature = "file-logging")]
fn file_layer(
    base_log_dir: &Path,
    filter: EnvFilter,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    let appender = tracing_appender::rolling::never(&run_folder, "crtp-link.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(filter)
        .boxed();

    Ok((layer, guard, run_folder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_flags() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-crtp-transports".to_string()]);
        assert!(build_filter(&flags, &LoggingConfig::default()).is_ok());
    }

    #[test]
    fn test_build_filter_normalizes_level_case() {
        let config = LoggingConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert!(build_filter(&CrateDebugFlags::default(), &config).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call comes first may win; at most one can succeed
        let first = init_logging(&CrateDebugFlags::default(), &LoggingConfig::default());
        let second = init_logging(&CrateDebugFlags::default(), &LoggingConfig::default());
        assert!(second.is_err());
        drop(first);
    }
}
