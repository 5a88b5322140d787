//! Core error types for canvas-core

use thiserror::Error;

/// Errors that can occur while starting the poller
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}
