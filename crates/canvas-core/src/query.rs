//! Allow-listed queries answered from the installed snapshot

use std::sync::Arc;

use canvas_api::{InventoryDocument, QueryName, ServerState, UnknownQueryName};
use canvas_inventory::{InventorySnapshot, PrimaryLoadBalancerError, ping};
use thiserror::Error;
use tracing::{debug, info};

use crate::cell::SnapshotCell;
use crate::verbosity::Verbosity;

pub const VERBOSE_ENABLED: &str = "verbose logging enabled";
pub const VERBOSE_DISABLED: &str = "verbose logging disabled";

/// Why a query could not be answered at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The name is not on the allow-list
    #[error("unknown query: {0}")]
    UnknownQuery(String),

    /// No snapshot has been installed yet
    #[error("inventory not yet initialized, first refresh has not completed")]
    Uninitialized,
}

impl From<UnknownQueryName> for QueryError {
    fn from(e: UnknownQueryName) -> Self {
        QueryError::UnknownQuery(e.0)
    }
}

/// Result of an answered query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutput {
    /// Plain text answer
    Text(String),
    /// Structured inventory dump
    Inventory(InventoryDocument),
    /// The fleet is misconfigured for this question
    FleetError(PrimaryLoadBalancerError),
}

/// Dispatches query names against the current snapshot
#[derive(Debug, Clone)]
pub struct QueryService {
    snapshots: Arc<SnapshotCell>,
    verbosity: Verbosity,
}

impl QueryService {
    pub fn new(snapshots: Arc<SnapshotCell>, verbosity: Verbosity) -> Self {
        Self {
            snapshots,
            verbosity,
        }
    }

    #[must_use]
    pub fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    pub async fn state(&self) -> ServerState {
        self.snapshots.state().await
    }

    /// Answer the query named `name`
    ///
    /// # Errors
    /// `UnknownQuery` for names outside the allow-list, `Uninitialized` for
    /// snapshot queries before the first refresh has installed anything.
    pub async fn query(&self, name: &str) -> Result<QueryOutput, QueryError> {
        let query: QueryName = name.parse()?;
        debug!(%query, "dispatching query");
        self.execute(query).await
    }

    /// Answer an already-validated query
    ///
    /// # Errors
    /// `Uninitialized` for snapshot queries before the first refresh.
    pub async fn execute(&self, query: QueryName) -> Result<QueryOutput, QueryError> {
        match query {
            QueryName::Ping => Ok(QueryOutput::Text(ping().to_string())),
            QueryName::EnableVerboseLogging => {
                self.verbosity.enable();
                info!("verbose logging enabled");
                Ok(QueryOutput::Text(VERBOSE_ENABLED.to_string()))
            }
            QueryName::DisableVerboseLogging => {
                self.verbosity.disable();
                info!("verbose logging disabled");
                Ok(QueryOutput::Text(VERBOSE_DISABLED.to_string()))
            }
            QueryName::GetAllInstances => {
                let snapshot = self.current().await?;
                Ok(QueryOutput::Inventory(snapshot.to_document()))
            }
            QueryName::GetPublicIpPrimaryLoadbalancer => {
                let snapshot = self.current().await?;
                Ok(match snapshot.resolve_primary_load_balancer_ip() {
                    Ok(ip) => QueryOutput::Text(ip.to_string()),
                    Err(e) => QueryOutput::FleetError(e),
                })
            }
        }
    }

    async fn current(&self) -> Result<Arc<InventorySnapshot>, QueryError> {
        self.snapshots.load().await.ok_or(QueryError::Uninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_inventory::{ActivationState, Instance, ProviderKind};

    fn service() -> (QueryService, Arc<SnapshotCell>) {
        let cell = Arc::new(SnapshotCell::new());
        (QueryService::new(cell.clone(), Verbosity::default()), cell)
    }

    fn primary_lb(id: &str, ip: &str) -> Instance {
        Instance::builder(ProviderKind::Aws, id)
            .activation_state(ActivationState::Running)
            .public_ip(Some(ip.to_string()))
            .tag("PRIMARY", "true")
            .build()
    }

    #[tokio::test]
    async fn test_ping_before_initialization() {
        let (service, _) = service();
        assert_eq!(
            service.query("ping").await,
            Ok(QueryOutput::Text("pong".to_string()))
        );
    }

    #[tokio::test]
    async fn test_snapshot_queries_before_initialization() {
        let (service, _) = service();
        assert_eq!(
            service.query("get_all_instances").await,
            Err(QueryError::Uninitialized)
        );
        assert_eq!(
            service.query("get_public_ip_primary_loadbalancer").await,
            Err(QueryError::Uninitialized)
        );
    }

    #[tokio::test]
    async fn test_unknown_query() {
        let (service, cell) = service();
        cell.install(InventorySnapshot::new(vec![], vec![], vec![])).await;

        assert_eq!(
            service.query("get_loadbalancer_ip").await,
            Err(QueryError::UnknownQuery("get_loadbalancer_ip".to_string()))
        );
    }

    #[tokio::test]
    async fn test_verbosity_toggles_without_snapshot() {
        let (service, _) = service();

        assert_eq!(
            service.query("enable_verbose_logging").await,
            Ok(QueryOutput::Text(VERBOSE_ENABLED.to_string()))
        );
        assert!(service.verbosity().is_verbose());

        assert_eq!(
            service.query("disable_verbose_logging").await,
            Ok(QueryOutput::Text(VERBOSE_DISABLED.to_string()))
        );
        assert!(!service.verbosity().is_verbose());
        assert_eq!(service.state().await, ServerState::Uninitialized);
    }

    #[tokio::test]
    async fn test_primary_load_balancer_ip() {
        let (service, cell) = service();
        cell.install(InventorySnapshot::new(
            vec![primary_lb("i-1", "1.2.3.4")],
            vec![],
            vec![],
        ))
        .await;

        assert_eq!(
            service.query("get_public_ip_primary_loadbalancer").await,
            Ok(QueryOutput::Text("1.2.3.4".to_string()))
        );
    }

    #[tokio::test]
    async fn test_fleet_error_is_an_answer() {
        let (service, cell) = service();
        cell.install(InventorySnapshot::new(
            vec![primary_lb("i-1", "1.2.3.4"), primary_lb("i-2", "1.2.3.5")],
            vec![],
            vec![],
        ))
        .await;

        assert_eq!(
            service.query("get_public_ip_primary_loadbalancer").await,
            Ok(QueryOutput::FleetError(
                PrimaryLoadBalancerError::AmbiguousPrimary(vec![
                    "i-1".to_string(),
                    "i-2".to_string()
                ])
            ))
        );
    }

    #[tokio::test]
    async fn test_get_all_instances() {
        let (service, cell) = service();
        let snapshot = InventorySnapshot::new(vec![primary_lb("i-1", "1.2.3.4")], vec![], vec![]);
        let expected = snapshot.to_document();
        cell.install(snapshot).await;

        assert_eq!(
            service.query("get_all_instances").await,
            Ok(QueryOutput::Inventory(expected))
        );
    }
}
