//! Poller configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often and for how long the inventory is polled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Delay between the end of one refresh and the start of the next
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Upper bound on a single inventory collection
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    30
}

impl PollerConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
