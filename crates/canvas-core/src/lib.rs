//! canvas-core: snapshot publication, polling and query dispatch
//!
//! Implements the `PollerActor` that refreshes the inventory on a fixed
//! interval using kameo, the `SnapshotCell` it publishes into, and the
//! `QueryService` that answers `/data/{query}` requests from whatever snapshot
//! is currently installed.

pub mod actor;
pub mod cell;
pub mod config;
pub mod error;
pub mod message;
pub mod query;
pub mod refresh;
pub mod state;
pub mod verbosity;

pub use actor::poller::{PollerActor, PollerActorArgs, spawn_poller};
pub use cell::SnapshotCell;
pub use config::PollerConfig;
pub use error::CoreError;
pub use message::GetPollerStatus;
pub use query::{QueryError, QueryOutput, QueryService};
pub use refresh::Refresher;
pub use state::{PollerStatus, StatusReceiver, StatusSender, status_channel};
pub use verbosity::Verbosity;
