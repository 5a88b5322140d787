//! Query names exposed under `/data/{query}`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// The allow-list of queries the discovery daemon answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryName {
    /// Liveness check
    Ping,
    /// Dump every known instance
    GetAllInstances,
    /// Public IP of the primary load balancer
    GetPublicIpPrimaryLoadbalancer,
    /// Let debug output through the log filter
    EnableVerboseLogging,
    /// Restore the configured log level
    DisableVerboseLogging,
}

impl QueryName {
    /// Every allowed query
    pub const ALL: [QueryName; 5] = [
        QueryName::Ping,
        QueryName::GetAllInstances,
        QueryName::GetPublicIpPrimaryLoadbalancer,
        QueryName::EnableVerboseLogging,
        QueryName::DisableVerboseLogging,
    ];

    /// Path segment for this query
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueryName::Ping => "ping",
            QueryName::GetAllInstances => "get_all_instances",
            QueryName::GetPublicIpPrimaryLoadbalancer => "get_public_ip_primary_loadbalancer",
            QueryName::EnableVerboseLogging => "enable_verbose_logging",
            QueryName::DisableVerboseLogging => "disable_verbose_logging",
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query name outside the allow-list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown query: {0}")]
pub struct UnknownQueryName(pub String);

impl FromStr for QueryName {
    type Err = UnknownQueryName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryName::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownQueryName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_allowed_name() {
        for query in QueryName::ALL {
            assert_eq!(query.as_str().parse::<QueryName>(), Ok(query));
        }
    }

    #[test]
    fn test_reject_unlisted_names() {
        for name in ["", "PING", "get_loadbalancer_ip", "__class__", "ping/"] {
            let err = name.parse::<QueryName>().unwrap_err();
            assert_eq!(err, UnknownQueryName(name.to_string()));
        }
    }

    #[test]
    fn test_serde_matches_path_segment() {
        for query in QueryName::ALL {
            let json = serde_json::to_string(&query).unwrap();
            assert_eq!(json, format!("\"{}\"", query.as_str()));
        }
    }
}
