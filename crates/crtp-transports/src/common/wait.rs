//! Receive wait modes

use std::time::Duration;

/// How long `receive_packet` may block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveWait {
    /// Single zero-timeout poll
    NonBlocking,

    /// Single poll bounded by the given timeout
    Timeout(Duration),

    /// Block until a packet arrives
    Forever,
}

impl ReceiveWait {
    /// Build from a signed number of seconds: 0 polls, positive values bound
    /// the wait, negative values wait forever. NaN polls.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs < 0.0 {
            Self::Forever
        } else if secs > 0.0 {
            Self::Timeout(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
        } else {
            Self::NonBlocking
        }
    }

    /// Native timeout for a single poll, or None for `Forever`.
    /// Sub-millisecond remainders are truncated.
    pub fn timeout_ms(&self) -> Option<u32> {
        match self {
            Self::NonBlocking => Some(0),
            Self::Timeout(d) => Some(u32::try_from(d.as_millis()).unwrap_or(u32::MAX)),
            Self::Forever => None,
        }
    }
}

impl Default for ReceiveWait {
    fn default() -> Self {
        Self::NonBlocking
    }
}

impl From<f64> for ReceiveWait {
    fn from(secs: f64) -> Self {
        Self::from_secs_f64(secs)
    }
}

impl From<Duration> for ReceiveWait {
    fn from(d: Duration) -> Self {
        if d.is_zero() {
            Self::NonBlocking
        } else {
            Self::Timeout(d)
        }
    }
}
