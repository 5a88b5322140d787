//! `PollerActor`: periodic inventory refresh
//!
//! Owns the only write path into the `SnapshotCell`. Cycles run one at a time
//! inside the actor; the next cycle is scheduled `interval` after the previous
//! one finished, whatever its outcome.

use std::sync::Arc;
use std::time::Duration;

use kameo::actor::{ActorRef, WeakActorRef};
use kameo::error::ActorStopReason;
use kameo::message::{Context, Message};
use kameo::prelude::*;
use tracing::{debug, info, warn};

use canvas_inventory::InventoryCollector;

use crate::cell::SnapshotCell;
use crate::error::CoreError;
use crate::message::{GetPollerStatus, Refresh};
use crate::refresh::Refresher;
use crate::state::{PollerStatus, StatusSender};

/// Arguments for spawning a `PollerActor`
pub struct PollerActorArgs {
    /// Collector bound to the cloud provider
    pub collector: InventoryCollector,
    /// Where new snapshots are installed
    pub snapshots: Arc<SnapshotCell>,
    /// Delay between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Status publication channel
    pub status: StatusSender,
}

/// Background inventory poller
pub struct PollerActor {
    refresher: Refresher,
    interval: Duration,
    /// Generation of the one `Refresh` currently in flight
    scheduled: u64,
    /// Used by scheduled refreshes; does not keep the actor alive
    self_ref: WeakActorRef<Self>,
}

impl PollerActor {
    /// Send `Refresh` to this actor after `delay`, superseding any earlier one
    fn schedule_refresh(&mut self, delay: Duration) {
        self.scheduled += 1;
        let msg = Refresh {
            generation: self.scheduled,
        };
        let actor_ref = self.self_ref.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(actor_ref) = actor_ref.upgrade() else {
                return;
            };
            if actor_ref.tell(msg).await.is_err() {
                warn!("poller stopped before scheduled refresh");
            }
        });
    }
}

/// Spawn a poller; its first cycle starts immediately
pub fn spawn_poller(args: PollerActorArgs) -> ActorRef<PollerActor> {
    PollerActor::spawn(args)
}

impl Actor for PollerActor {
    type Args = PollerActorArgs;
    type Error = CoreError;

    async fn on_start(args: Self::Args, actor_ref: ActorRef<Self>) -> Result<Self, Self::Error> {
        if args.interval.is_zero() {
            return Err(CoreError::ConfigError(
                "refresh interval must be greater than zero".to_string(),
            ));
        }

        info!(
            id = %actor_ref.id(),
            interval_secs = args.interval.as_secs(),
            timeout_secs = args.collector.timeout().as_secs(),
            "PollerActor starting"
        );

        let mut actor = Self {
            refresher: Refresher::new(args.collector, args.snapshots, args.status),
            interval: args.interval,
            scheduled: 0,
            self_ref: actor_ref.downgrade(),
        };
        actor.schedule_refresh(Duration::ZERO);

        Ok(actor)
    }

    async fn on_stop(
        &mut self,
        _actor_ref: WeakActorRef<Self>,
        reason: ActorStopReason,
    ) -> Result<(), Self::Error> {
        info!(reason = ?reason, "PollerActor stopping");
        Ok(())
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Message<Refresh> for PollerActor {
    type Reply = ();

    async fn handle(
        &mut self,
        msg: Refresh,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        if msg.generation != self.scheduled {
            debug!(
                generation = msg.generation,
                scheduled = self.scheduled,
                "ignoring stale refresh"
            );
            return;
        }

        // Failures are logged and recorded by the refresher; the cadence is
        // the same either way.
        let _ = self.refresher.refresh_cycle().await;
        self.schedule_refresh(self.interval);
    }
}

impl Message<GetPollerStatus> for PollerActor {
    type Reply = PollerStatus;

    async fn handle(
        &mut self,
        _msg: GetPollerStatus,
        _ctx: &mut Context<Self, Self::Reply>,
    ) -> Self::Reply {
        self.refresher.status()
    }
}
