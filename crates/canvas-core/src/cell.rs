//! The "current snapshot" slot

use std::sync::Arc;

use canvas_api::ServerState;
use canvas_inventory::InventorySnapshot;
use tokio::sync::RwLock;

/// Holds the most recently installed inventory snapshot
///
/// Readers clone the `Arc` under the read guard and drop the guard
/// immediately, so a reader never waits on a refresh in progress and always
/// sees a complete snapshot. `install` is the only write.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: RwLock<Option<Arc<InventorySnapshot>>>,
}

impl SnapshotCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The installed snapshot, or `None` before the first successful refresh
    pub async fn load(&self) -> Option<Arc<InventorySnapshot>> {
        self.current.read().await.clone()
    }

    /// Replace the installed snapshot, returning the one it superseded
    pub async fn install(&self, snapshot: InventorySnapshot) -> Option<Arc<InventorySnapshot>> {
        let snapshot = Arc::new(snapshot);
        self.current.write().await.replace(snapshot)
    }

    pub async fn state(&self) -> ServerState {
        if self.current.read().await.is_some() {
            ServerState::Ready
        } else {
            ServerState::Uninitialized
        }
    }
}
