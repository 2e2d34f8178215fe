// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Driver registry
//!
//! Holds the drivers available to the protocol stack, in priority order, and
//! picks the one that accepts a given URI.

use crate::common::{InterfaceInfo, LinkError, LinkResult};
use crate::traits::{CrtpDriver, LinkErrorCallback, LinkQualityCallback};
use tracing::{debug, warn};

/// Ordered collection of link drivers
#[derive(Default)]
pub struct DriverRegistry {
    drivers: Vec<Box<dyn CrtpDriver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a driver; earlier drivers are tried first
    pub fn register(&mut self, driver: Box<dyn CrtpDriver>) {
        debug!("Registered link driver {}", driver.get_name());
        self.drivers.push(driver);
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Scan every driver and concatenate the results in registration order
    ///
    /// A driver whose scan fails is skipped.
    pub fn scan_interfaces(&self, address: Option<&str>) -> Vec<InterfaceInfo> {
        let mut available = Vec::new();

        for driver in &self.drivers {
            match driver.scan_interface(address) {
                Ok(found) => {
                    debug!("Scan on {} found {} interface(s)", driver.get_name(), found.len());
                    available.extend(found);
                }
                Err(e) => warn!("Scan on {} failed: {}", driver.get_name(), e),
            }
        }

        available
    }

    /// `(name, status)` for every driver
    pub fn interfaces_status(&self) -> Vec<(String, String)> {
        self.drivers
            .iter()
            .map(|d| (d.get_name().to_string(), d.get_status().to_string()))
            .collect()
    }

    /// Connect the first driver that accepts `uri`
    ///
    /// Drivers rejecting the URI scheme are skipped; any other connection
    /// failure is returned. `Ok(None)` when no driver handles the scheme.
    pub fn get_link_driver(
        &mut self,
        uri: &str,
        link_quality_callback: Option<LinkQualityCallback>,
        link_error_callback: Option<LinkErrorCallback>,
    ) -> LinkResult<Option<&mut (dyn CrtpDriver + 'static)>> {
        for index in 0..self.drivers.len() {
            let attempt = self.drivers[index].connect(
                uri,
                link_quality_callback.clone(),
                link_error_callback.clone(),
            );

            match attempt {
                Ok(()) => {
                    debug!("{} selected for {}", self.drivers[index].get_name(), uri);
                    return Ok(Some(self.drivers[index].as_mut()));
                }
                Err(LinkError::WrongUriType(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        debug!("No link driver accepts {}", uri);
        Ok(None)
    }
}
