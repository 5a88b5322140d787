//! Application state shared across HTTP handlers

use canvas_core::{QueryService, StatusReceiver};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Answers `/data/{query}`
    pub queries: QueryService,
    /// Latest poller status, readable without waiting on a refresh
    pub status: StatusReceiver,
}

impl AppState {
    /// Create new application state
    pub fn new(queries: QueryService, status: StatusReceiver) -> Self {
        Self { queries, status }
    }
}
