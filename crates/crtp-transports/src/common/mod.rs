//! Common types and utilities for all link drivers

pub mod config;
pub mod error;
pub mod packet;
pub mod wait;

pub use config::DriverConfig;
pub use error::{LinkError, LinkResult};
pub use packet::{CrtpPacket, InterfaceInfo, NativePacket};
pub use wait::ReceiveWait;
