//! Wire representation of the fleet inventory

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One instance, flattened for `get_all_instances`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InstanceRecord {
    /// Provider the instance lives in (`aws`, `static`)
    #[serde(rename = "type")]
    pub provider: String,
    /// Public DNS name
    pub public_dns: Option<String>,
    /// Public IPv4 address
    pub public_ip: Option<String>,
    /// Private IPv4 address
    pub private_ip: Option<String>,
    /// Provider instance ID
    pub id: String,
    /// Application-defined state
    pub operational_state: String,
    /// Provider lifecycle state (`pending`, `running`, ...)
    pub activation_state: String,
    /// Instance tags
    pub tags: BTreeMap<String, String>,
}

/// Every known instance, keyed by role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryDocument {
    pub loadbalancer: Vec<InstanceRecord>,
    pub webmachine: Vec<InstanceRecord>,
    pub riak: Vec<InstanceRecord>,
}

impl InventoryDocument {
    /// Iterate over all records with their role key
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &InstanceRecord)> {
        self.loadbalancer
            .iter()
            .map(|r| ("loadbalancer", r))
            .chain(self.webmachine.iter().map(|r| ("webmachine", r)))
            .chain(self.riak.iter().map(|r| ("riak", r)))
    }

    /// Records for a single role key, if the key is known
    #[must_use]
    pub fn role(&self, key: &str) -> Option<&[InstanceRecord]> {
        match key {
            "loadbalancer" => Some(&self.loadbalancer),
            "webmachine" => Some(&self.webmachine),
            "riak" => Some(&self.riak),
            _ => None,
        }
    }

    /// Find a record by instance ID
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&InstanceRecord> {
        self.iter().map(|(_, r)| r).find(|r| r.id == id)
    }

    /// Total number of records across all roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.loadbalancer.len() + self.webmachine.len() + self.riak.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> InstanceRecord {
        InstanceRecord {
            provider: "aws".to_string(),
            public_dns: None,
            public_ip: Some("1.2.3.4".to_string()),
            private_ip: None,
            id: id.to_string(),
            operational_state: "unknown".to_string(),
            activation_state: "running".to_string(),
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn test_type_field_name() {
        let json = serde_json::to_value(record("i-1")).unwrap();
        assert_eq!(json["type"], "aws");
        assert!(json.get("provider").is_none());
        assert!(json["public_dns"].is_null());
    }

    #[test]
    fn test_find_across_roles() {
        let doc = InventoryDocument {
            loadbalancer: vec![record("i-lb")],
            webmachine: vec![],
            riak: vec![record("i-riak")],
        };

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.find("i-riak").map(|r| r.id.as_str()), Some("i-riak"));
        assert!(doc.find("i-missing").is_none());
        assert_eq!(doc.role("webmachine").map(<[_]>::len), Some(0));
        assert!(doc.role("database").is_none());
    }
}
