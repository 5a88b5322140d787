//! HTTP client for the discovery daemon

use std::net::IpAddr;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use canvas_api::{HealthResponse, InventoryDocument, QueryName};

use crate::error::{ClientError, Result};

/// HTTP client for communicating with the discovery daemon
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: Client,
    base_url: Url,
}

impl DiscoveryClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    ///
    /// # Example
    /// ```no_run
    /// use canvas_client::DiscoveryClient;
    ///
    /// let client = DiscoveryClient::new("http://localhost:8880")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { client, base_url })
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    fn data_url(&self, query: &str) -> Result<Url> {
        let mut url = self.url("/data/")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidResponse("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(query);
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status,
                message: error_message(&body),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.send(url).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // System endpoints

    /// Get daemon health status
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon returns an error.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json(self.url("/health")?).await
    }

    // Query endpoints

    /// Run a raw query and return the response body
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon rejects the query.
    pub async fn query(&self, name: &str) -> Result<String> {
        let url = self.data_url(name)?;
        Ok(self.send(url).await?.text().await?)
    }

    /// Liveness check that does not depend on the inventory
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon returns an error.
    pub async fn ping(&self) -> Result<String> {
        self.query(QueryName::Ping.as_str()).await
    }

    /// Public IP of the running load balancer tagged as primary
    ///
    /// # Errors
    /// Returns `ClientError::Fleet` when the daemon reports that no single
    /// primary can be chosen, or another error if the request fails.
    pub async fn primary_load_balancer_ip(&self) -> Result<IpAddr> {
        let body = self
            .query(QueryName::GetPublicIpPrimaryLoadbalancer.as_str())
            .await?;
        parse_primary_ip(&body)
    }

    /// Every known instance, grouped by role
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is not an inventory.
    pub async fn all_instances(&self) -> Result<InventoryDocument> {
        self.get_json(self.data_url(QueryName::GetAllInstances.as_str())?)
            .await
    }

    /// Switch the daemon's verbose logging on or off
    ///
    /// Returns the daemon's confirmation message.
    ///
    /// # Errors
    /// Returns an error if the request fails or the daemon returns an error.
    pub async fn set_verbose_logging(&self, enabled: bool) -> Result<String> {
        let query = if enabled {
            QueryName::EnableVerboseLogging
        } else {
            QueryName::DisableVerboseLogging
        };
        self.query(query.as_str()).await
    }
}

/// The daemon answers fleet problems with 200 and a message, not an address
fn parse_primary_ip(body: &str) -> Result<IpAddr> {
    let body = body.trim();
    body.parse()
        .map_err(|_| ClientError::Fleet(body.to_string()))
}

/// Pull the message out of an `ApiError` body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DiscoveryClient::new("http://localhost:8880");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = DiscoveryClient::new("not a url");
        assert!(client.is_err());
    }

    #[test]
    fn test_url_building() {
        let client = DiscoveryClient::new("http://localhost:8880").unwrap();
        let url = client.url("/health").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8880/health");
    }

    #[test]
    fn test_data_url_escapes_query() {
        let client = DiscoveryClient::new("http://localhost:8880").unwrap();
        assert_eq!(
            client.data_url("ping").unwrap().as_str(),
            "http://localhost:8880/data/ping"
        );
        assert_eq!(
            client.data_url("a/b").unwrap().as_str(),
            "http://localhost:8880/data/a%2Fb"
        );
    }

    #[test]
    fn test_parse_primary_ip() {
        assert_eq!(
            parse_primary_ip("10.0.0.1\n").unwrap(),
            "10.0.0.1".parse::<IpAddr>().unwrap()
        );

        match parse_primary_ip("no running load balancer instances") {
            Err(ClientError::Fleet(message)) => {
                assert_eq!(message, "no running load balancer instances");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"code":"UNKNOWN_QUERY","message":"unknown query: x"}"#),
            "unknown query: x"
        );
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }
}
