//! Configuration validation
//!
//! Collects every problem in the configuration instead of stopping at the
//! first one.

use crate::{ConfigError, ConfigResult, CrtpLinkConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    InvalidValue { section: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { section, reason } => {
                write!(f, "Invalid [{}] configuration: {}", section, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &CrtpLinkConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn collect_errors(config: &CrtpLinkConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if let Err(reason) = config.driver.validate() {
        errors.push(ConfigValidationError::InvalidValue {
            section: "driver".to_string(),
            reason,
        });
    }

    if let Err(reason) = config.logging.validate() {
        errors.push(ConfigValidationError::InvalidValue {
            section: "logging".to_string(),
            reason,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CrtpLinkConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = CrtpLinkConfig::default();
        config.driver.uri_scheme.clear();
        config.logging.level = "chatty".to_string();

        assert_eq!(collect_errors(&config).len(), 2);

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("[driver]"));
        assert!(message.contains("[logging]"));
    }
}
