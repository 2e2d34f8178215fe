// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # crtp-observability
//!
//! Logging setup shared by the crtp-link crates, with per-crate debug flag
//! support.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "crtp-link",
    "crtp-transports",
    "crtp-config",
    "crtp-observability",
];
