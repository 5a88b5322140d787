//! High-level inventory collection API

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::error::InventoryError;
use crate::provider::{CloudProvider, Reservation};
use crate::snapshot::InventorySnapshot;
use crate::types::{ProviderKind, Role};

/// Default bound on a full enumeration of the provider
pub const DEFAULT_COLLECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Inventory collector
///
/// Walks every region of a provider and builds an [`InventorySnapshot`].
pub struct InventoryCollector {
    provider: Arc<dyn CloudProvider>,
    timeout: Duration,
}

impl InventoryCollector {
    /// Create a new inventory collector
    pub fn new(provider: Arc<dyn CloudProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_COLLECT_TIMEOUT,
        }
    }

    /// Set collection timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Collect a full snapshot
    ///
    /// # Errors
    /// Returns the first provider error encountered, or
    /// `InventoryError::Timeout` if enumeration exceeds the timeout. Nothing
    /// partial is ever returned.
    #[instrument(skip(self), fields(provider = %self.provider.kind()))]
    pub async fn collect(&self) -> Result<InventorySnapshot, InventoryError> {
        info!("collecting inventory");

        let reservations = tokio::time::timeout(self.timeout, self.list_all_reservations())
            .await
            .map_err(|_| InventoryError::Timeout(self.timeout))??;

        let snapshot = partition(self.provider.kind(), reservations);

        info!(
            loadbalancer = snapshot.load_balancers().len(),
            webmachine = snapshot.web_machines().len(),
            riak = snapshot.riak_nodes().len(),
            "inventory collection completed"
        );

        Ok(snapshot)
    }

    async fn list_all_reservations(&self) -> Result<Vec<Reservation>, InventoryError> {
        let regions = self.provider.list_regions().await?;
        debug!(regions = regions.len(), "listed regions");

        let mut reservations = Vec::new();
        for region in regions {
            let connection = region.connect().await?;
            let found = connection.list_reservations().await?;
            debug!(region = region.name(), reservations = found.len(), "listed reservations");
            reservations.extend(found);
        }

        Ok(reservations)
    }
}

/// Split reservations into role sequences by security group
///
/// A reservation contributes all its instances to every role whose label is
/// among its groups. Reservations that match no role are dropped.
#[must_use]
pub fn partition(provider: ProviderKind, reservations: Vec<Reservation>) -> InventorySnapshot {
    let mut loadbalancer = Vec::new();
    let mut webmachine = Vec::new();
    let mut riak = Vec::new();

    for reservation in reservations {
        let roles: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| reservation.has_group(role.label()))
            .collect();

        if roles.is_empty() {
            debug!(
                reservation = %reservation.id,
                groups = ?reservation.groups,
                "reservation has no tracked role"
            );
            continue;
        }

        for role in roles {
            debug!(reservation = %reservation.id, %role, "reservation has role");
            let container = match role {
                Role::LoadBalancer => &mut loadbalancer,
                Role::WebMachine => &mut webmachine,
                Role::Riak => &mut riak,
            };
            container.extend(
                reservation
                    .instances
                    .iter()
                    .cloned()
                    .map(|raw| raw.into_instance(provider)),
            );
        }
    }

    InventorySnapshot::new(loadbalancer, webmachine, riak)
}
