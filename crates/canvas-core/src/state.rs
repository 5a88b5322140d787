//! Refresh bookkeeping published by the poller

use chrono::{DateTime, Utc};
use kameo_macros::Reply;
use tokio::sync::watch;

/// Outcome history of refresh cycles
#[derive(Debug, Clone, Default, PartialEq, Eq, Reply)]
pub struct PollerStatus {
    /// Refresh cycles completed, successful or not
    pub cycles: u64,
    /// Refresh cycles that installed nothing
    pub failures: u64,
    /// Collection time of the installed snapshot
    pub last_success: Option<DateTime<Utc>>,
    /// Error from the latest cycle, if it failed
    pub last_error: Option<String>,
}

impl PollerStatus {
    pub fn record_success(&mut self, collected_at: DateTime<Utc>) {
        self.cycles += 1;
        self.last_success = Some(collected_at);
        self.last_error = None;
    }

    pub fn record_failure(&mut self, error: impl ToString) {
        self.cycles += 1;
        self.failures += 1;
        self.last_error = Some(error.to_string());
    }
}

pub type StatusSender = watch::Sender<PollerStatus>;
pub type StatusReceiver = watch::Receiver<PollerStatus>;

/// Channel the poller publishes its status on
///
/// Readers use `borrow()` and never wait for a refresh to finish.
#[must_use]
pub fn status_channel() -> (StatusSender, StatusReceiver) {
    watch::channel(PollerStatus::default())
}
