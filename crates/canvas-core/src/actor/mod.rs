//! Actor implementations

pub mod poller;

pub use poller::{PollerActor, PollerActorArgs};
