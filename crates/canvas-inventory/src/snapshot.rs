//! Point-in-time view of the fleet and the queries answered from it

use chrono::{DateTime, Utc};
use thiserror::Error;

use canvas_api::InventoryDocument;

use crate::types::{Instance, Role};

/// Body returned by the `ping` query
pub const PING_RESPONSE: &str = "pong";

/// Tag that marks the authoritative load balancer
pub const PRIMARY_TAG: &str = "PRIMARY";

/// Liveness check; does not depend on any snapshot
#[must_use]
pub fn ping() -> &'static str {
    PING_RESPONSE
}

/// Why the primary load balancer's IP could not be determined
///
/// Each of these is a fleet configuration problem, not a transient failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimaryLoadBalancerError {
    #[error("no running load balancer instances")]
    NoRunningLoadBalancer,

    #[error("no running load balancer is tagged PRIMARY=true")]
    NoPrimaryTag,

    #[error("more than one running load balancer is tagged PRIMARY=true: {}", .0.join(", "))]
    AmbiguousPrimary(Vec<String>),

    #[error("primary load balancer {0} has no public IP")]
    MissingPublicIp(String),
}

/// Immutable inventory of the fleet at one point in time
///
/// A refresh builds a new snapshot and swaps it in; an installed snapshot is
/// never edited, so it can be shared between readers without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    loadbalancer: Vec<Instance>,
    webmachine: Vec<Instance>,
    riak: Vec<Instance>,
    collected_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Build a snapshot from instances already partitioned by role
    #[must_use]
    pub fn new(
        loadbalancer: Vec<Instance>,
        webmachine: Vec<Instance>,
        riak: Vec<Instance>,
    ) -> Self {
        Self::collected_at(loadbalancer, webmachine, riak, Utc::now())
    }

    /// Build a snapshot with an explicit collection time
    #[must_use]
    pub fn collected_at(
        loadbalancer: Vec<Instance>,
        webmachine: Vec<Instance>,
        riak: Vec<Instance>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            loadbalancer,
            webmachine,
            riak,
            collected_at,
        }
    }

    /// Instances in a role, in collection order
    #[must_use]
    pub fn role(&self, role: Role) -> &[Instance] {
        match role {
            Role::LoadBalancer => &self.loadbalancer,
            Role::WebMachine => &self.webmachine,
            Role::Riak => &self.riak,
        }
    }

    #[must_use]
    pub fn load_balancers(&self) -> &[Instance] {
        &self.loadbalancer
    }

    #[must_use]
    pub fn web_machines(&self) -> &[Instance] {
        &self.webmachine
    }

    #[must_use]
    pub fn riak_nodes(&self) -> &[Instance] {
        &self.riak
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.collected_at
    }

    /// Every instance with its role
    pub fn instances(&self) -> impl Iterator<Item = (Role, &Instance)> {
        Role::ALL
            .into_iter()
            .flat_map(move |role| self.role(role).iter().map(move |i| (role, i)))
    }

    /// Find an instance by ID in any role
    #[must_use]
    pub fn find_instance(&self, id: &str) -> Option<&Instance> {
        self.instances().map(|(_, i)| i).find(|i| i.id() == id)
    }

    /// Total number of instances across roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.loadbalancer.len() + self.webmachine.len() + self.riak.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Public IP of the one running load balancer tagged primary
    ///
    /// # Errors
    /// Returns a `PrimaryLoadBalancerError` describing which fleet
    /// configuration rule is violated.
    pub fn resolve_primary_load_balancer_ip(&self) -> Result<&str, PrimaryLoadBalancerError> {
        let running: Vec<&Instance> = self.loadbalancer.iter().filter(|i| i.is_running()).collect();
        if running.is_empty() {
            return Err(PrimaryLoadBalancerError::NoRunningLoadBalancer);
        }

        let primaries: Vec<&Instance> = running.into_iter().filter(|i| is_primary(i)).collect();
        match primaries.len() {
            0 => Err(PrimaryLoadBalancerError::NoPrimaryTag),
            1 => {
                let primary = primaries[0];
                primary.public_ip().ok_or_else(|| {
                    PrimaryLoadBalancerError::MissingPublicIp(primary.id().to_string())
                })
            }
            _ => Err(PrimaryLoadBalancerError::AmbiguousPrimary(
                primaries.iter().map(|i| i.id().to_string()).collect(),
            )),
        }
    }

    /// Flatten every instance into the `get_all_instances` document
    #[must_use]
    pub fn to_document(&self) -> InventoryDocument {
        InventoryDocument {
            loadbalancer: self.loadbalancer.iter().map(Instance::to_record).collect(),
            webmachine: self.webmachine.iter().map(Instance::to_record).collect(),
            riak: self.riak.iter().map(Instance::to_record).collect(),
        }
    }
}

fn is_primary(instance: &Instance) -> bool {
    instance
        .tag(PRIMARY_TAG)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
