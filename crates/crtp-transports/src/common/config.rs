//! Common configuration types for link drivers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// URI scheme handled by the native driver
pub const DEFAULT_URI_SCHEME: &str = "native";

/// Poll timeout used to emulate an indefinite receive
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Native driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Scheme a URI must carry to be accepted (`<scheme>://...`)
    pub uri_scheme: String,

    /// Native poll timeout used while waiting forever
    pub poll_interval_ms: u64,

    /// Filter handed to the native scan
    pub scan_filter: String,

    /// Maximum outbound payload size (None = unlimited)
    pub max_payload_size: Option<usize>,

    /// Close a held connection before opening a new one.
    /// When false the previous handle is replaced without being closed.
    pub close_previous_on_connect: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            uri_scheme: DEFAULT_URI_SCHEME.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            scan_filter: String::new(),
            max_payload_size: None,
            close_previous_on_connect: false,
        }
    }
}

impl DriverConfig {
    /// Create a new config for the given scheme
    pub fn new(uri_scheme: impl Into<String>) -> Self {
        Self {
            uri_scheme: uri_scheme.into(),
            ..Default::default()
        }
    }

    /// Set the forever-wait poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the native scan filter
    pub fn with_scan_filter(mut self, filter: impl Into<String>) -> Self {
        self.scan_filter = filter.into();
        self
    }

    /// Set maximum payload size
    pub fn with_max_payload_size(mut self, size: usize) -> Self {
        self.max_payload_size = Some(size);
        self
    }

    /// Close the previous connection on reconnect
    pub fn with_close_previous_on_connect(mut self, close: bool) -> Self {
        self.close_previous_on_connect = close;
        self
    }

    /// Poll interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// URI prefix accepted by the driver, e.g. `native://`
    pub fn uri_prefix(&self) -> String {
        format!("{}://", self.uri_scheme)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.uri_scheme.is_empty() {
            return Err("URI scheme cannot be empty".to_string());
        }

        if self.uri_scheme.contains("://") {
            return Err(format!(
                "URI scheme must not include the separator: {}",
                self.uri_scheme
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }

        if self.poll_interval_ms > u32::MAX as u64 {
            return Err(format!(
                "Poll interval {} ms exceeds the native timeout range",
                self.poll_interval_ms
            ));
        }

        if let Some(max_size) = self.max_payload_size {
            if max_size == 0 {
                return Err("Maximum payload size must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}
