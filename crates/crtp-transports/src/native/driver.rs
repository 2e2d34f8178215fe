// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Native link driver
//!
//! Translates CRTP packets to and from the native library's packet type and
//! emulates an indefinite receive on top of the library's timeout-bounded
//! poll.

use crate::common::{
    CrtpPacket, DriverConfig, InterfaceInfo, LinkError, LinkResult, NativePacket, ReceiveWait,
};
use crate::traits::{
    CrtpDriver, LinkErrorCallback, LinkQualityCallback, NativeConnection, NativeLink,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

const STATUS: &str = "okay";
const NAME: &str = "NativeLink";

/// Cancels a `ReceiveWait::Forever` receive from another thread
///
/// A cancellation is one-shot and scoped to the current connection. One
/// requested while no indefinite receive is running is consumed by the next
/// one. It is discarded when an indefinite receive returns a packet first or
/// when the driver connects again.
#[derive(Debug, Clone, Default)]
pub struct ReceiveCanceller {
    requested: Arc<AtomicBool>,
}

impl ReceiveCanceller {
    /// Request cancellation
    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether a cancellation is waiting to be consumed
    pub fn is_pending(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }
}

/// Link driver backed by a native connection library
///
/// Holds at most one open connection. Every operation except scanning and
/// the static metadata getters requires one and fails with
/// [`LinkError::NotConnected`] otherwise.
///
/// Calling `connect` while connected replaces the held connection without
/// closing it unless [`DriverConfig::close_previous_on_connect`] is set.
pub struct NativeDriver<L: NativeLink> {
    link: L,
    config: DriverConfig,
    connection: Option<L::Connection>,
    // Kept for the lifetime of the connection, never invoked here: the
    // native library handles link quality and errors itself.
    link_quality_callback: Option<LinkQualityCallback>,
    link_error_callback: Option<LinkErrorCallback>,
    canceller: ReceiveCanceller,
}

impl<L: NativeLink> NativeDriver<L> {
    /// Create a driver with the default configuration
    pub fn new(link: L) -> Self {
        Self {
            link,
            config: DriverConfig::default(),
            connection: None,
            link_quality_callback: None,
            link_error_callback: None,
            canceller: ReceiveCanceller::default(),
        }
    }

    /// Create a driver with a custom configuration
    pub fn with_config(link: L, config: DriverConfig) -> LinkResult<Self> {
        config.validate().map_err(LinkError::InvalidConfig)?;

        Ok(Self {
            config,
            ..Self::new(link)
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Check if a connection is held
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Handle that cancels an indefinite receive on this driver
    pub fn cancel_handle(&self) -> ReceiveCanceller {
        self.canceller.clone()
    }

    fn to_native(config: &DriverConfig, pk: &CrtpPacket) -> LinkResult<NativePacket> {
        if let Some(max_size) = config.max_payload_size {
            if pk.data().len() > max_size {
                return Err(LinkError::PayloadTooLarge {
                    size: pk.data().len(),
                    max_size,
                });
            }
        }

        Ok(NativePacket::from(pk))
    }

    fn from_native(native: NativePacket) -> CrtpPacket {
        if native.size != native.payload.len() {
            debug!(
                "[NATIVE-LINK] Inbound size field {} disagrees with payload length {}",
                native.size,
                native.payload.len()
            );
        }

        CrtpPacket::from(native)
    }
}

impl<L: NativeLink> CrtpDriver for NativeDriver<L> {
    fn connect(
        &mut self,
        uri: &str,
        link_quality_callback: Option<LinkQualityCallback>,
        link_error_callback: Option<LinkErrorCallback>,
    ) -> LinkResult<()> {
        if !uri.starts_with(&self.config.uri_prefix()) {
            return Err(LinkError::WrongUriType(uri.to_string()));
        }

        if self.config.close_previous_on_connect {
            if let Some(mut previous) = self.connection.take() {
                debug!("[NATIVE-LINK] Closing previous connection before reconnecting");
                if let Err(e) = previous.close() {
                    warn!("[NATIVE-LINK] Failed to close previous connection: {}", e);
                }
            }
        }

        let connection = self.link.open(uri).map_err(|e| {
            if e.is_connection_error() {
                e
            } else {
                LinkError::ConnectionFailed(e.to_string())
            }
        })?;

        if self.connection.replace(connection).is_some() {
            warn!(
                "[NATIVE-LINK] Replaced a live connection without closing it (now {})",
                uri
            );
        }

        self.link_quality_callback = link_quality_callback;
        self.link_error_callback = link_error_callback;
        self.canceller.clear();

        info!("🦀 [NATIVE-LINK] Connected to {}", uri);

        Ok(())
    }

    fn send_packet(&mut self, pk: &CrtpPacket) -> LinkResult<()> {
        let connection = self.connection.as_mut().ok_or(LinkError::NotConnected)?;
        let native = Self::to_native(&self.config, pk)?;

        trace!(
            "[NATIVE-LINK] Sending port={} channel={} size={}",
            native.port,
            native.channel,
            native.size
        );

        connection.send(&native)
    }

    fn receive_packet(&mut self, wait: ReceiveWait) -> LinkResult<Option<CrtpPacket>> {
        let connection = self.connection.as_mut().ok_or(LinkError::NotConnected)?;

        let (timeout_ms, forever) = match wait.timeout_ms() {
            Some(ms) => (ms, false),
            // Validated to fit in u32
            None => (self.config.poll_interval_ms as u32, true),
        };

        loop {
            if forever && self.canceller.take() {
                debug!("[NATIVE-LINK] Indefinite receive cancelled");
                return Err(LinkError::Cancelled);
            }

            let native = connection.recv(timeout_ms)?;

            if native.valid {
                if forever {
                    self.canceller.clear();
                }

                let pk = Self::from_native(native);
                trace!(
                    "[NATIVE-LINK] Received port={} channel={} size={}",
                    pk.port(),
                    pk.channel(),
                    pk.data().len()
                );
                return Ok(Some(pk));
            }

            if !forever {
                return Ok(None);
            }
        }
    }

    fn scan_interface(&self, address: Option<&str>) -> LinkResult<Vec<InterfaceInfo>> {
        if let Some(address) = address {
            trace!("[NATIVE-LINK] Scan address filter {} is not used", address);
        }

        let found = self.link.scan(&self.config.scan_filter)?;
        let interfaces: Vec<InterfaceInfo> = found.into_iter().map(InterfaceInfo::new).collect();

        debug!("[NATIVE-LINK] Scan found {} interface(s): {:?}", interfaces.len(), interfaces);

        Ok(interfaces)
    }

    fn get_status(&self) -> &str {
        STATUS
    }

    fn get_name(&self) -> &str {
        NAME
    }

    fn get_help(&self) -> Option<&str> {
        None
    }

    fn needs_resending(&self) -> bool {
        true
    }

    fn close(&mut self) -> LinkResult<()> {
        let mut connection = self.connection.take().ok_or(LinkError::NotConnected)?;
        self.link_quality_callback = None;
        self.link_error_callback = None;

        connection.close()?;

        info!("[NATIVE-LINK] Connection closed");

        Ok(())
    }
}
