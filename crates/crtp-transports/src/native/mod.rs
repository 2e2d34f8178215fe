// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Native link driver
//!
//! `NativeDriver` adapts any [`NativeLink`](crate::traits::NativeLink)
//! implementation to the [`CrtpDriver`](crate::traits::CrtpDriver) contract.
//!
//! ## Feature Flags
//!
//! - `loopback`: in-process echo link (`LoopbackLink`), enabled by default
//!
//! ## Example
//!
//! ```no_run
//! use crtp_transports::native::{LoopbackLink, NativeDriver};
//! use crtp_transports::prelude::*;
//!
//! let mut driver = NativeDriver::new(LoopbackLink::new(1));
//! driver.connect("native://0", None, None)?;
//!
//! driver.send_packet(&CrtpPacket::new(3, 1, vec![0x01, 0x02]))?;
//! let reply = driver.receive_packet(ReceiveWait::from(0.5))?;
//! println!("Reply: {:?}", reply);
//!
//! driver.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod driver;

#[cfg(feature = "loopback")]
pub mod loopback;

pub use driver::{NativeDriver, ReceiveCanceller};

#[cfg(feature = "loopback")]
pub use loopback::{LoopbackConnection, LoopbackInjector, LoopbackLink};
