//! Transition aware replication strategy.
//!
//! The strategy store-gateways use to shard blocks. Owners are collected
//! clockwise from the block's hash, like [`SimpleStrategy`](super::SimpleStrategy),
//! with one difference: every JOINING or LEAVING member that gets included
//! raises the target by one. A member moving in may not serve yet and one
//! moving out may already have stopped, so the block also stays on a stable
//! member for the duration of the transition.
//!
//! # Algorithm
//!
//! 1. `target = replication_factor`
//! 2. Walk clockwise from the first token `>= hash`
//! 3. Skip members already included and members with an expired heartbeat
//! 4. Include the member; if it is JOINING or LEAVING, `target += 1`
//! 5. Stop at `target` owners, or once every member has been visited
//!
//! Several transitioning members on one walk each add one owner.

use std::time::SystemTime;

use corelib::{HealthPolicy, Ring};
use tracing::trace;

use crate::placement::ReplicaSet;
use crate::strategy::{collect_replicas, ReplicationStrategy};

/// Health filtered replication with the transition-safety extension.
#[derive(Debug, Clone, Default)]
pub struct TransitionAwareStrategy {
    health: HealthPolicy,
}

impl TransitionAwareStrategy {
    pub fn new(health: HealthPolicy) -> Self {
        Self { health }
    }

    pub fn health_policy(&self) -> &HealthPolicy {
        &self.health
    }
}

impl ReplicationStrategy for TransitionAwareStrategy {
    fn replicas(
        &self,
        ring: &Ring,
        hash: u32,
        replication_factor: usize,
        now: SystemTime,
    ) -> ReplicaSet {
        let replicas = collect_replicas(ring, hash, replication_factor, &self.health, now, |m| {
            usize::from(m.state.is_transitioning())
        });
        trace!(hash, revision = ring.revision(), %replicas, "computed replica set");
        replicas
    }

    fn name(&self) -> &'static str {
        "TransitionAwareStrategy"
    }
}
