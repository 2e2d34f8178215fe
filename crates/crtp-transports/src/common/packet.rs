// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Packet types exchanged between the protocol stack, the driver and the
//! native link library

use serde::{Deserialize, Serialize};

/// Highest port number addressable in a CRTP header
pub const MAX_PORT: u8 = 0x0F;

/// Highest channel number addressable in a CRTP header
pub const MAX_CHANNEL: u8 = 0x03;

/// CRTP protocol packet
///
/// Transport-agnostic message unit produced and consumed by the protocol
/// stack. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrtpPacket {
    port: u8,
    channel: u8,
    data: Vec<u8>,
}

impl CrtpPacket {
    /// Create a new packet
    pub fn new(port: u8, channel: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            port,
            channel,
            data: data.into(),
        }
    }

    /// Rebuild a packet from a CRTP header byte
    pub fn from_header(header: u8, data: impl Into<Vec<u8>>) -> Self {
        Self::new((header >> 4) & MAX_PORT, header & MAX_CHANNEL, data)
    }

    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the packet, returning its payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// CRTP header byte: port in the high nibble, link bits set, channel in
    /// the low two bits. Out-of-range port/channel values are masked.
    pub fn header(&self) -> u8 {
        ((self.port & MAX_PORT) << 4) | (0b11 << 2) | (self.channel & MAX_CHANNEL)
    }
}

/// Packet structure used by the native link library
///
/// `size` duplicates `payload.len()` because the native framing needs an
/// explicit length. `valid` is false when a receive timed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativePacket {
    pub port: u8,
    pub channel: u8,
    pub size: usize,
    pub payload: Vec<u8>,
    pub valid: bool,
}

impl NativePacket {
    /// A valid packet with `size` derived from the payload
    pub fn new(port: u8, channel: u8, payload: Vec<u8>) -> Self {
        Self {
            port,
            channel,
            size: payload.len(),
            payload,
            valid: true,
        }
    }

    /// Result of a receive that yielded no packet
    pub fn invalid() -> Self {
        Self::default()
    }
}

impl From<&CrtpPacket> for NativePacket {
    fn from(pk: &CrtpPacket) -> Self {
        Self::new(pk.port, pk.channel, pk.data.clone())
    }
}

impl From<NativePacket> for CrtpPacket {
    fn from(native: NativePacket) -> Self {
        Self::new(native.port, native.channel, native.payload)
    }
}

/// One endpoint reported by an interface scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// URI of the discovered endpoint
    pub uri: String,

    /// Reserved per-endpoint metadata, empty for native links
    pub description: String,
}

impl InterfaceInfo {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            description: String::new(),
        }
    }
}
