//! Provider backed by a TOML inventory file
//!
//! The file is re-read on every `list_regions`, so editing it changes what the
//! next refresh sees:
//!
//! ```toml
//! [[regions]]
//! name = "eu-west-1"
//!
//! [[regions.reservations]]
//! id = "r-1"
//! groups = ["loadbalancer"]
//!
//! [[regions.reservations.instances]]
//! id = "i-1"
//! state = "running"
//! ip_address = "1.2.3.4"
//! tags = { PRIMARY = "true" }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::InventoryError;
use crate::provider::{CloudProvider, Connection, Region, Reservation};
use crate::types::ProviderKind;

#[derive(Debug, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct RegionEntry {
    name: String,
    #[serde(default)]
    reservations: Vec<Reservation>,
}

/// Cloud provider that reads its inventory from a file
#[derive(Debug, Clone)]
pub struct StaticProvider {
    path: PathBuf,
    kind: ProviderKind,
}

impl StaticProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ProviderKind::Static,
        }
    }

    /// Stamp collected instances with a different provider kind
    #[must_use]
    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<InventoryFile, InventoryError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| InventoryError::Io(format!("{}: {e}", self.path.display())))?;
        Ok(toml::from_str(&content)?)
    }
}

#[async_trait]
impl CloudProvider for StaticProvider {
    async fn list_regions(&self) -> Result<Vec<Box<dyn Region>>, InventoryError> {
        let file = self.load().await?;
        debug!(path = %self.path.display(), regions = file.regions.len(), "loaded inventory file");

        Ok(file
            .regions
            .into_iter()
            .map(|entry| Box::new(StaticRegion(entry)) as Box<dyn Region>)
            .collect())
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

struct StaticRegion(RegionEntry);

#[async_trait]
impl Region for StaticRegion {
    fn name(&self) -> &str {
        &self.0.name
    }

    async fn connect(&self) -> Result<Box<dyn Connection>, InventoryError> {
        Ok(Box::new(StaticConnection(self.0.reservations.clone())))
    }
}

struct StaticConnection(Vec<Reservation>);

#[async_trait]
impl Connection for StaticConnection {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, InventoryError> {
        Ok(self.0.clone())
    }
}
