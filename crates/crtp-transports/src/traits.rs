// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Driver and native link trait definitions
//!
//! `CrtpDriver` is the interface the protocol stack consumes. `NativeLink` and
//! `NativeConnection` describe the external connection library a driver
//! delegates byte-level transport to.

use crate::common::{CrtpPacket, InterfaceInfo, LinkResult, NativePacket, ReceiveWait};
use std::sync::Arc;

/// Link quality report in percent
pub type LinkQualityCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Link error report (results in disconnection)
pub type LinkErrorCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Link driver contract consumed by the protocol stack
pub trait CrtpDriver: Send {
    /// Connect the driver to a URI
    ///
    /// The callbacks are part of the contract; a driver whose transport
    /// reports quality and errors itself may never call them.
    fn connect(
        &mut self,
        uri: &str,
        link_quality_callback: Option<LinkQualityCallback>,
        link_error_callback: Option<LinkErrorCallback>,
    ) -> LinkResult<()>;

    /// Send a packet over the held connection
    fn send_packet(&mut self, pk: &CrtpPacket) -> LinkResult<()>;

    /// Receive a packet, `Ok(None)` when nothing arrived within the wait
    fn receive_packet(&mut self, wait: ReceiveWait) -> LinkResult<Option<CrtpPacket>>;

    /// Scan for reachable endpoints; does not need a held connection
    fn scan_interface(&self, address: Option<&str>) -> LinkResult<Vec<InterfaceInfo>>;

    /// Enumerate available link URIs
    fn enumerate(&self) -> LinkResult<Vec<InterfaceInfo>> {
        self.scan_interface(None)
    }

    /// Health string of the interface
    fn get_status(&self) -> &str;

    /// Human readable name of the interface
    fn get_name(&self) -> &str;

    /// How to form a URI for this driver, None means no help
    fn get_help(&self) -> Option<&str>;

    /// Whether the stack must resend packets that got no answer
    fn needs_resending(&self) -> bool;

    /// Close the held connection
    fn close(&mut self) -> LinkResult<()>;
}

/// Native connection library entry points
pub trait NativeLink: Send {
    /// Connection type produced by `open`
    type Connection: NativeConnection;

    /// Open a connection to the given URI
    fn open(&self, uri: &str) -> LinkResult<Self::Connection>;

    /// Discover reachable endpoint URIs, in discovery order
    fn scan(&self, filter: &str) -> LinkResult<Vec<String>>;
}

/// One open native link session
pub trait NativeConnection: Send {
    /// Transmit one frame
    fn send(&mut self, packet: &NativePacket) -> LinkResult<()>;

    /// Wait up to `timeout_ms` for one frame. A timeout yields a packet with
    /// `valid == false`, not an error.
    fn recv(&mut self, timeout_ms: u32) -> LinkResult<NativePacket>;

    /// Close the session
    fn close(&mut self) -> LinkResult<()>;
}
