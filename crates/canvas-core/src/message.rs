//! Message types for actor communication
//!
//! Message handlers are implemented in their respective actor modules.

// ============================================================================
// PollerActor Messages
// ============================================================================

/// Run one refresh cycle, then schedule the next one
///
/// Only the poller sends this to itself. A `Refresh` whose `generation` is
/// not the one currently scheduled is dropped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Refresh {
    pub(crate) generation: u64,
}

/// Current refresh bookkeeping
#[derive(Debug, Clone, Copy)]
pub struct GetPollerStatus;
