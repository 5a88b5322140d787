//! Cloud provider construction from configuration

use std::sync::Arc;

use canvas_inventory::{CloudProvider, StaticProvider};
use tracing::info;

use crate::config::ProviderConfig;

/// Build the provider the poller collects from
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn CloudProvider> {
    match config {
        ProviderConfig::Static {
            path,
            instance_type,
        } => {
            info!(path = %path.display(), kind = ?instance_type, "using static inventory provider");
            Arc::new(StaticProvider::new(path.clone()).with_kind(*instance_type))
        }
    }
}
