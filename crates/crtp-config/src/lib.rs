// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # crtp-link Configuration
//!
//! Type-safe configuration loader with support for:
//! - TOML file parsing (`crtp_link.toml`)
//! - Environment variable overrides (`CRTP_*`)
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crtp_config::load_config;
//!
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Scheme: {}", config.driver.uri_scheme);
//! println!("Poll interval: {} ms", config.driver.poll_interval_ms);
//! ```
//!
//! ## File Format
//!
//! ```toml
//! [driver]
//! uri_scheme = "native"
//! poll_interval_ms = 100
//! scan_filter = ""
//! max_payload_size = 30
//! close_previous_on_connect = false
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_str,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
