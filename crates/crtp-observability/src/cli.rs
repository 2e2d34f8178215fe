//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-crtp-transports` to raise one crate to debug
//! level.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug
pub const DEBUG_ENV_VAR: &str = "CRTP_DEBUG";

/// Parsed debug flags
///
/// # Example
/// ```rust
/// use crtp_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(std::env::args());
/// if flags.is_enabled("crtp-transports") {
///     // Driver traffic will be logged at debug level
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`; `--debug-all`
    /// enables every known crate.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    /// Merge a comma separated crate list (or `all`)
    pub fn merge_list(&mut self, list: &str) {
        if list.trim() == "all" {
            self.enable_all();
            return;
        }

        for crate_name in list.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Get log level for a crate
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create an `EnvFilter` directive string
    ///
    /// Crate names are converted to their tracing targets (hyphens become
    /// underscores). `default_level` applies to everything else.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut targets: Vec<String> = self
            .enabled_crates
            .keys()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        targets.sort();
        targets.push(default_level.to_string());
        targets.join(",")
    }
}

/// Parse debug flags from process arguments and the `CRTP_DEBUG` variable
///
/// Variable format: comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var(DEBUG_ENV_VAR) {
        flags.merge_list(&env_var);
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {var}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {var}=all                           Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        var = DEBUG_ENV_VAR
    )
}
