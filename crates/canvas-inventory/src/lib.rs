//! canvas-inventory: cloud instance inventory
//!
//! Immutable inventory snapshots, the queries answered from them, and the
//! collaborator traits used to enumerate a cloud provider's instances.

pub mod collector;
pub mod error;
pub mod provider;
pub mod snapshot;
pub mod static_provider;
pub mod types;

pub use collector::{InventoryCollector, partition};
pub use error::InventoryError;
pub use provider::{CloudProvider, Connection, RawInstance, Region, Reservation};
pub use snapshot::{InventorySnapshot, PING_RESPONSE, PrimaryLoadBalancerError, ping};
pub use static_provider::StaticProvider;
pub use types::{ActivationState, Instance, ProviderKind, Role};
