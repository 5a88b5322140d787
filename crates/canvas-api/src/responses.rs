//! Response types for the API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of the discovery daemon
///
/// `Ready` is entered once the first snapshot is installed and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    Uninitialized,
    Ready,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub state: ServerState,
    /// When the installed snapshot was collected
    pub last_refresh: Option<DateTime<Utc>>,
    pub refresh_cycles: u64,
    pub refresh_failures: u64,
    /// Error from the most recent failed cycle, cleared on success
    pub last_error: Option<String>,
}
