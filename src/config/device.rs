//! Device link configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::LinkConfig;

use super::defaults;

/// Serial device settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceSection {
    /// Serial port path
    #[serde(default = "defaults::port")]
    pub port: String,

    /// Baud rate
    #[serde(default = "defaults::baud_rate")]
    pub baud_rate: u32,

    /// Per-command reply deadline (ms)
    #[serde(default = "defaults::command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Map download deadline (ms)
    #[serde(default = "defaults::download_timeout_ms")]
    pub download_timeout_ms: u64,

    /// Silence that ends a download once data has arrived (ms)
    #[serde(default = "defaults::idle_gap_ms")]
    pub idle_gap_ms: u64,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            baud_rate: defaults::baud_rate(),
            command_timeout_ms: defaults::command_timeout_ms(),
            download_timeout_ms: defaults::download_timeout_ms(),
            idle_gap_ms: defaults::idle_gap_ms(),
        }
    }
}

impl DeviceSection {
    /// Convert to LinkConfig
    pub fn to_link_config(&self) -> LinkConfig {
        LinkConfig {
            command_timeout: Duration::from_millis(self.command_timeout_ms),
            download_timeout: Duration::from_millis(self.download_timeout_ms),
            idle_gap: Duration::from_millis(self.idle_gap_ms),
            ..LinkConfig::default()
        }
    }
}
