// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Loading happens in three tiers, later tiers winning:
//! 1. TOML file (base values, missing keys take defaults)
//! 2. Environment variables
//! 3. CLI arguments

use crate::types::CONFIG_FILE_NAME;
use crate::validation::validate_config;
use crate::{ConfigError, ConfigResult, CrtpLinkConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV_VAR: &str = "CRTP_LINK_CONFIG_PATH";

/// Find the configuration file
///
/// Search order:
/// 1. `CRTP_LINK_CONFIG_PATH` environment variable
/// 2. Current working directory: `./crtp_link.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV_VAR) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV_VAR,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.extend(cwd.ancestors().take(6).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV_VAR
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CrtpLinkConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    debug!("Loading configuration from {}", config_file.display());
    let content = fs::read_to_string(&config_file)?;

    load_config_str(&content, cli_args)
}

/// Load configuration from TOML text, applying the same overrides and
/// validation as [`load_config`]
pub fn load_config_str(
    content: &str,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CrtpLinkConfig> {
    let mut config: CrtpLinkConfig = toml::from_str(content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `CRTP_URI_SCHEME` -> `driver.uri_scheme`
/// - `CRTP_POLL_INTERVAL_MS` -> `driver.poll_interval_ms`
/// - `CRTP_SCAN_FILTER` -> `driver.scan_filter`
/// - `CRTP_MAX_PAYLOAD_SIZE` -> `driver.max_payload_size`
/// - `CRTP_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut CrtpLinkConfig) {
    let vars: HashMap<String, String> = [
        ("CRTP_URI_SCHEME", "uri_scheme"),
        ("CRTP_POLL_INTERVAL_MS", "poll_interval_ms"),
        ("CRTP_SCAN_FILTER", "scan_filter"),
        ("CRTP_MAX_PAYLOAD_SIZE", "max_payload_size"),
        ("CRTP_LOG_LEVEL", "log_level"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_overrides(config, &vars, "environment");
}

/// Apply CLI argument overrides to configuration
///
/// Recognized keys: `uri_scheme`, `poll_interval_ms`, `scan_filter`,
/// `max_payload_size`, `close_previous_on_connect`, `log_level`.
/// Unparseable values are ignored with a warning.
pub fn apply_cli_overrides(config: &mut CrtpLinkConfig, cli_args: &HashMap<String, String>) {
    apply_overrides(config, cli_args, "cli");
}

fn apply_overrides(config: &mut CrtpLinkConfig, values: &HashMap<String, String>, source: &str) {
    if let Some(value) = values.get("uri_scheme") {
        config.driver.uri_scheme = value.clone();
    }
    if let Some(value) = values.get("poll_interval_ms") {
        match value.parse::<u64>() {
            Ok(ms) => config.driver.poll_interval_ms = ms,
            Err(_) => warn!("Ignoring {} poll_interval_ms override: {}", source, value),
        }
    }
    if let Some(value) = values.get("scan_filter") {
        config.driver.scan_filter = value.clone();
    }
    if let Some(value) = values.get("max_payload_size") {
        if value.is_empty() || value == "none" {
            config.driver.max_payload_size = None;
        } else {
            match value.parse::<usize>() {
                Ok(size) => config.driver.max_payload_size = Some(size),
                Err(_) => warn!("Ignoring {} max_payload_size override: {}", source, value),
            }
        }
    }
    if let Some(value) = values.get("close_previous_on_connect") {
        let value = value.to_lowercase();
        config.driver.close_previous_on_connect = value == "true" || value == "1" || value == "yes";
    }
    if let Some(value) = values.get("log_level") {
        config.logging.level = value.clone();
    }
}
