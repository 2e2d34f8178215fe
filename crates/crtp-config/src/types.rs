// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `crtp_link.toml`.

use serde::{Deserialize, Serialize};

pub use crtp_observability::{LogFormat, LoggingConfig};
pub use crtp_transports::DriverConfig;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "crtp_link.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrtpLinkConfig {
    /// `[driver]` section
    pub driver: DriverConfig,

    /// `[logging]` section
    pub logging: LoggingConfig,
}
