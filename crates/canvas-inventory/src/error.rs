//! Error types for canvas-inventory

use thiserror::Error;

/// Errors that can occur while enumerating the cloud inventory
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// Listing regions failed
    #[error("failed to list regions: {0}")]
    ListRegions(String),

    /// Connecting to a region failed
    #[error("failed to connect to region {region}: {message}")]
    Connect {
        /// Region name
        region: String,
        /// Provider error message
        message: String,
    },

    /// Listing reservations in a region failed
    #[error("failed to list reservations in region {region}: {message}")]
    ListReservations {
        /// Region name
        region: String,
        /// Provider error message
        message: String,
    },

    /// Provider credentials were rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Provider payload could not be parsed
    #[error("malformed inventory payload: {0}")]
    Parse(String),

    /// Reading an inventory source failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Enumeration took longer than the collection timeout
    #[error("inventory collection timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl InventoryError {
    /// Check if a later attempt could succeed without operator action
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, InventoryError::Auth(_) | InventoryError::Parse(_))
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(e: std::io::Error) -> Self {
        InventoryError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for InventoryError {
    fn from(e: toml::de::Error) -> Self {
        InventoryError::Parse(e.to_string())
    }
}
