//! Inventory type definitions

use std::collections::BTreeMap;
use std::fmt;

use canvas_api::InstanceRecord;
use serde::{Deserialize, Serialize};

/// Tag that names the operational state of an instance
pub const OPERATIONAL_STATE_TAG: &str = "OPERATIONAL_STATE";

/// Operational state used when neither the provider nor the tags supply one
pub const DEFAULT_OPERATIONAL_STATE: &str = "unknown";

// ============================================================================
// Provider & lifecycle
// ============================================================================

/// Where an instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Amazon EC2
    Aws,
    /// Inventory described in a local file
    Static,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Aws => write!(f, "aws"),
            ProviderKind::Static => write!(f, "static"),
        }
    }
}

/// Provider lifecycle state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationState {
    Pending,
    Running,
    Stopping,
    Stopped,
    Terminated,
    #[serde(other)]
    Unknown,
}

impl ActivationState {
    /// Map a provider lifecycle string onto an activation state
    ///
    /// EC2's `shutting-down` precedes termination and is reported as
    /// `Stopping`. Unrecognised values become `Unknown`.
    #[must_use]
    pub fn from_provider(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "pending" => ActivationState::Pending,
            "running" => ActivationState::Running,
            "stopping" | "shutting-down" => ActivationState::Stopping,
            "stopped" => ActivationState::Stopped,
            "terminated" => ActivationState::Terminated,
            _ => ActivationState::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationState::Pending => "pending",
            ActivationState::Running => "running",
            ActivationState::Stopping => "stopping",
            ActivationState::Stopped => "stopped",
            ActivationState::Terminated => "terminated",
            ActivationState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Roles
// ============================================================================

/// What kind of node an instance is, judged by its security group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Load balancer (haproxy)
    LoadBalancer,
    /// Application server
    WebMachine,
    /// Storage node
    Riak,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::LoadBalancer, Role::WebMachine, Role::Riak];

    /// Security group identifier that marks membership in this role
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::LoadBalancer => "loadbalancer",
            Role::WebMachine => "webmachine",
            Role::Riak => "riak",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Instance
// ============================================================================

/// One cloud compute instance
///
/// Built once from a provider record and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    provider: ProviderKind,
    public_dns: Option<String>,
    public_ip: Option<String>,
    private_ip: Option<String>,
    id: String,
    activation_state: ActivationState,
    operational_state: String,
    tags: BTreeMap<String, String>,
}

impl Instance {
    /// Start building an instance with the given provider and ID
    #[must_use]
    pub fn builder(provider: ProviderKind, id: impl Into<String>) -> InstanceBuilder {
        InstanceBuilder {
            instance: Instance {
                provider,
                public_dns: None,
                public_ip: None,
                private_ip: None,
                id: id.into(),
                activation_state: ActivationState::Unknown,
                operational_state: DEFAULT_OPERATIONAL_STATE.to_string(),
                tags: BTreeMap::new(),
            },
        }
    }

    #[must_use]
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    #[must_use]
    pub fn public_dns(&self) -> Option<&str> {
        self.public_dns.as_deref()
    }

    #[must_use]
    pub fn public_ip(&self) -> Option<&str> {
        self.public_ip.as_deref()
    }

    #[must_use]
    pub fn private_ip(&self) -> Option<&str> {
        self.private_ip.as_deref()
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn activation_state(&self) -> ActivationState {
        self.activation_state
    }

    #[must_use]
    pub fn operational_state(&self) -> &str {
        &self.operational_state
    }

    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.activation_state == ActivationState::Running
    }

    /// Flatten into the wire record served by `get_all_instances`
    #[must_use]
    pub fn to_record(&self) -> InstanceRecord {
        InstanceRecord {
            provider: self.provider.to_string(),
            public_dns: self.public_dns.clone(),
            public_ip: self.public_ip.clone(),
            private_ip: self.private_ip.clone(),
            id: self.id.clone(),
            operational_state: self.operational_state.clone(),
            activation_state: self.activation_state.to_string(),
            tags: self.tags.clone(),
        }
    }
}

/// Builder for [`Instance`]
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    instance: Instance,
}

impl InstanceBuilder {
    #[must_use]
    pub fn public_dns(mut self, dns: Option<String>) -> Self {
        self.instance.public_dns = dns;
        self
    }

    #[must_use]
    pub fn public_ip(mut self, ip: Option<String>) -> Self {
        self.instance.public_ip = ip;
        self
    }

    #[must_use]
    pub fn private_ip(mut self, ip: Option<String>) -> Self {
        self.instance.private_ip = ip;
        self
    }

    #[must_use]
    pub fn activation_state(mut self, state: ActivationState) -> Self {
        self.instance.activation_state = state;
        self
    }

    #[must_use]
    pub fn operational_state(mut self, state: impl Into<String>) -> Self {
        self.instance.operational_state = state.into();
        self
    }

    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.instance.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.instance.tags = tags;
        self
    }

    #[must_use]
    pub fn build(self) -> Instance {
        self.instance
    }
}
