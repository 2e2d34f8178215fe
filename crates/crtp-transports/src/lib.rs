//! # crtp-transports
//!
//! Link drivers for the CRTP protocol stack. A driver exposes a uniform
//! packet interface (connect, send, receive, scan, close) and delegates the
//! byte-level transport to a native connection library.
//!
//! ## Receive Semantics
//!
//! [`ReceiveWait`] selects one of three modes:
//! - `NonBlocking`: a single zero-timeout poll
//! - `Timeout(d)`: a single poll bounded by `d`
//! - `Forever`: repeated short polls until a packet arrives; never returns
//!   `Ok(None)`. Cancel it with a [`native::ReceiveCanceller`].
//!
//! A timeout is not an error: bounded receives return `Ok(None)`.
//!
//! ## Feature Flags
//!
//! - `loopback` (default): in-process echo link for demos and tests
//!
//! ## Example
//!
//! ```no_run
//! use crtp_transports::native::{LoopbackLink, NativeDriver};
//! use crtp_transports::prelude::*;
//!
//! let mut driver = NativeDriver::new(LoopbackLink::new(2));
//!
//! for interface in driver.scan_interface(None)? {
//!     println!("Found {}", interface.uri);
//! }
//!
//! driver.connect("native://0", None, None)?;
//! driver.send_packet(&CrtpPacket::new(0, 0, b"hello".to_vec()))?;
//!
//! // Block until the echo comes back
//! let pk = driver.receive_packet(ReceiveWait::Forever)?;
//! println!("Received: {:?}", pk);
//!
//! driver.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! 1. **Common**: packets, errors, configuration, wait modes
//! 2. **Traits**: driver contract and native library contract
//! 3. **Native**: the native link driver (plus the loopback link)
//! 4. **Registry**: driver selection by URI

pub mod common;
pub mod native;
pub mod registry;
pub mod traits;

// Re-export commonly used types
pub use common::{
    CrtpPacket, DriverConfig, InterfaceInfo, LinkError, LinkResult, NativePacket, ReceiveWait,
};

pub use native::{NativeDriver, ReceiveCanceller};
pub use registry::DriverRegistry;
pub use traits::{CrtpDriver, LinkErrorCallback, LinkQualityCallback, NativeConnection, NativeLink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::common::{
        CrtpPacket, DriverConfig, InterfaceInfo, LinkError, LinkResult, NativePacket, ReceiveWait,
    };
    pub use crate::traits::*;
}
