//! canvas-api: Shared API types and schemas
//!
//! Contains the inventory document, query names and response types used across
//! the discovery daemon, the HTTP client and `canvasctl`.

pub mod inventory;
pub mod query;
pub mod responses;

pub use inventory::{InstanceRecord, InventoryDocument};
pub use query::{QueryName, UnknownQueryName};
pub use responses::{HealthResponse, ServerState};
