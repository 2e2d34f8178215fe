//! # crtp-link
//!
//! Link drivers for the CRTP protocol stack. A driver exposes connect, send,
//! receive, scan and close over a native connection library that does the
//! actual byte-level transport.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! crtp-link = "0.1"  # Default: config + observability + loopback link
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): TOML configuration loader
//! - **`observability`** (default): logging setup and debug flags
//! - **`loopback`** (default): in-process echo link
//! - **`file-logging`**: JSON log files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crtp_link::prelude::*;
//! use crtp_link::transports::native::LoopbackLink;
//!
//! let mut driver = NativeDriver::new(LoopbackLink::new(1));
//! driver.connect("native://0", None, None)?;
//!
//! driver.send_packet(&CrtpPacket::new(3, 1, vec![0x01, 0x02]))?;
//! if let Some(pk) = driver.receive_packet(ReceiveWait::from(0.1))? {
//!     println!("port {} channel {}: {:?}", pk.port(), pk.channel(), pk.data());
//! }
//!
//! driver.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### From a configuration file
//!
//! ```rust,no_run
//! use crtp_link::prelude::*;
//! use crtp_link::transports::native::LoopbackLink;
//!
//! let config = crtp_link::config::load_config(None, None)?;
//! let _guard = crtp_link::observability::init_logging(
//!     &crtp_link::observability::parse_debug_flags(),
//!     &config.logging,
//! )?;
//!
//! let driver = NativeDriver::with_config(LoopbackLink::new(1), config.driver)?;
//! for interface in driver.enumerate()? {
//!     println!("{}", interface.uri);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Link drivers, packets and native link traits
pub use crtp_transports as transports;

#[cfg(feature = "config")]
pub use crtp_config as config;

#[cfg(feature = "observability")]
pub use crtp_observability as observability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::transports::prelude::*;
    pub use crate::transports::{DriverRegistry, NativeDriver, ReceiveCanceller};

    #[cfg(feature = "config")]
    pub use crate::config::CrtpLinkConfig;
}
