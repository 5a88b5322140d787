//! Cloud provider collaborator traits
//!
//! The discovery service only needs three calls from a provider: list its
//! regions, connect to a region, and list the reservations visible through
//! that connection.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::types::{
    ActivationState, DEFAULT_OPERATIONAL_STATE, Instance, OPERATIONAL_STATE_TAG, ProviderKind,
};

/// Entry point into a cloud provider's inventory
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// List every region the account can see
    async fn list_regions(&self) -> Result<Vec<Box<dyn Region>>, InventoryError>;

    /// Provider kind stamped on every instance collected from it
    fn kind(&self) -> ProviderKind;
}

/// One provider region
#[async_trait]
pub trait Region: Send + Sync {
    fn name(&self) -> &str;

    /// Open a connection scoped to this region
    async fn connect(&self) -> Result<Box<dyn Connection>, InventoryError>;
}

/// Connection to one region
#[async_trait]
pub trait Connection: Send + Sync {
    /// List all reservations in the region
    async fn list_reservations(&self) -> Result<Vec<Reservation>, InventoryError>;
}

/// Instances launched together, sharing a set of security groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    /// Security group identifiers
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

impl Reservation {
    /// Whether the reservation belongs to the given security group
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// Instance as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstance {
    pub id: String,
    #[serde(default)]
    pub public_dns_name: Option<String>,
    /// Public IPv4 address
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub private_ip_address: Option<String>,
    /// Provider lifecycle string (`running`, `shutting-down`, ...)
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Application-defined state, if the provider tracks one
    #[serde(default)]
    pub operational_state: Option<String>,
}

impl RawInstance {
    /// Convert into an immutable [`Instance`]
    ///
    /// Empty address strings are treated as absent. The operational state
    /// falls back to the `OPERATIONAL_STATE` tag, then to `"unknown"`.
    #[must_use]
    pub fn into_instance(self, provider: ProviderKind) -> Instance {
        let operational_state = self
            .operational_state
            .or_else(|| self.tags.get(OPERATIONAL_STATE_TAG).cloned())
            .unwrap_or_else(|| DEFAULT_OPERATIONAL_STATE.to_string());

        Instance::builder(provider, self.id)
            .public_dns(non_empty(self.public_dns_name))
            .public_ip(non_empty(self.ip_address))
            .private_ip(non_empty(self.private_ip_address))
            .activation_state(ActivationState::from_provider(&self.state))
            .operational_state(operational_state)
            .tags(self.tags)
            .build()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
