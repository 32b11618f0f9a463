//! Replication strategy abstractions.
//!
//! Replication strategies determine which members own a ring position.
//! Different strategies handle members in transition differently:
//!
//! - **TransitionAwareStrategy**: one extra stable replica for every
//!   JOINING/LEAVING member crossed
//! - **SimpleStrategy**: replication factor healthy members, nothing more

pub mod simple;
pub mod transition_aware;

use std::time::SystemTime;

use corelib::{HealthPolicy, Member, Ring};

use crate::placement::ReplicaSet;

pub use simple::SimpleStrategy;
pub use transition_aware::TransitionAwareStrategy;

/// Trait for replication strategies.
///
/// Implementations are pure functions of their inputs: the same ring, hash,
/// factor and instant always give the same, identically ordered set. They are
/// shared across callers without locking.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Find the members owning `hash`.
    ///
    /// # Arguments
    /// * `ring` - Token index for one snapshot revision
    /// * `hash` - Ring position of the block
    /// * `replication_factor` - Nominal number of owners
    /// * `now` - Instant the health policy is evaluated at
    ///
    /// # Returns
    /// Owner addresses in walk order (primary first). Fewer than
    /// `replication_factor` entries is not an error.
    fn replicas(
        &self,
        ring: &Ring,
        hash: u32,
        replication_factor: usize,
        now: SystemTime,
    ) -> ReplicaSet;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Clockwise walk shared by the strategies.
///
/// Unhealthy members are skipped without being counted. `extension` returns
/// how many extra owners a just-included member adds to the target. The walk
/// stops once the target is met or every member on the ring has been seen.
pub(crate) fn collect_replicas(
    ring: &Ring,
    hash: u32,
    replication_factor: usize,
    health: &HealthPolicy,
    now: SystemTime,
    extension: impl Fn(&Member) -> usize,
) -> ReplicaSet {
    let mut target = replication_factor;
    let mut replicas = ReplicaSet::with_capacity(replication_factor + 1);
    if target == 0 || ring.is_empty() {
        return replicas;
    }

    let mut seen = vec![false; ring.member_count()];
    let mut distinct = 0;

    for entry in ring.walk(ring.locate(hash)) {
        if replicas.len() >= target || distinct == ring.members_on_ring() {
            break;
        }
        if seen[entry.member_index] {
            continue;
        }
        seen[entry.member_index] = true;
        distinct += 1;

        if !health.is_healthy(entry.member, now) {
            continue;
        }
        replicas.push(entry.member.address.clone());
        target += extension(entry.member);
    }

    replicas
}
