//! A single inventory refresh cycle

use std::sync::Arc;

use canvas_inventory::{InventoryCollector, InventoryError};
use tracing::{debug, error, info, instrument};

use crate::cell::SnapshotCell;
use crate::state::{PollerStatus, StatusSender};

/// Collects a fresh snapshot and installs it
pub struct Refresher {
    collector: InventoryCollector,
    snapshots: Arc<SnapshotCell>,
    status: StatusSender,
}

impl Refresher {
    pub fn new(
        collector: InventoryCollector,
        snapshots: Arc<SnapshotCell>,
        status: StatusSender,
    ) -> Self {
        Self {
            collector,
            snapshots,
            status,
        }
    }

    /// Snapshot of the published status
    #[must_use]
    pub fn status(&self) -> PollerStatus {
        self.status.borrow().clone()
    }

    /// Run one cycle
    ///
    /// On success the new snapshot replaces the installed one. On failure the
    /// installed snapshot, if any, is left untouched.
    ///
    /// # Errors
    /// Returns the collection error after logging it and recording it in the
    /// published status.
    #[instrument(skip(self))]
    pub async fn refresh_cycle(&self) -> Result<(), InventoryError> {
        match self.collector.collect().await {
            Ok(snapshot) => {
                let collected_at = snapshot.timestamp();
                let loadbalancer = snapshot.load_balancers().len();
                let webmachine = snapshot.web_machines().len();
                let riak = snapshot.riak_nodes().len();
                debug!(?snapshot, "collected snapshot");

                let previous = self.snapshots.install(snapshot).await;
                self.status.send_modify(|s| s.record_success(collected_at));

                info!(
                    loadbalancer,
                    webmachine,
                    riak,
                    first = previous.is_none(),
                    "installed inventory snapshot"
                );
                Ok(())
            }
            Err(e) => {
                self.status.send_modify(|s| s.record_failure(&e));
                error!(
                    error = %e,
                    retryable = e.is_retryable(),
                    "inventory refresh failed, keeping previous snapshot"
                );
                Err(e)
            }
        }
    }
}
