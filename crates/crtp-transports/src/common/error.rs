// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Common error types for all link drivers

/// Result type alias for link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Link driver error type
///
/// Timeouts are not represented here: a receive that sees no packet within
/// its wait window returns `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// URI does not belong to this driver's scheme
    #[error("Wrong URI type for this driver: {0}")]
    WrongUriType(String),

    /// The native library refused to open the URI
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Native send, receive or close failed on an established connection
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload exceeds the configured limit
    #[error("Payload too large: {size} bytes (max: {max_size})")]
    PayloadTooLarge { size: usize, max_size: usize },

    /// Operation requires an open connection - call connect() first
    #[error("Link is not connected")]
    NotConnected,

    /// An indefinite receive was cancelled through its canceller
    #[error("Receive cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LinkError {
    /// True for failures raised while establishing a connection
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            LinkError::WrongUriType(_) | LinkError::ConnectionFailed(_)
        )
    }

    /// True for failures raised by an established connection
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            LinkError::Transport(_) | LinkError::PayloadTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(LinkError::WrongUriType("radio://0".into()).is_connection_error());
        assert!(LinkError::ConnectionFailed("busy".into()).is_connection_error());
        assert!(LinkError::Transport("unplugged".into()).is_transport_error());
        assert!(LinkError::PayloadTooLarge { size: 40, max_size: 30 }.is_transport_error());

        assert!(!LinkError::NotConnected.is_connection_error());
        assert!(!LinkError::NotConnected.is_transport_error());
        assert!(!LinkError::Cancelled.is_transport_error());
    }

    #[test]
    fn test_error_display() {
        let err = LinkError::PayloadTooLarge { size: 40, max_size: 30 };
        assert_eq!(err.to_string(), "Payload too large: 40 bytes (max: 30)");
        assert_eq!(LinkError::NotConnected.to_string(), "Link is not connected");
    }
}
