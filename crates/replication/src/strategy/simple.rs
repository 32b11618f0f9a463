//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the hash),
//! skipping members with an expired heartbeat. Members in transition count
//! like any other member. Suitable when callers handle handoff themselves,
//! e.g. in tests or for read paths that tolerate a short gap during a
//! rollout.
//!
//! # Algorithm
//!
//! 1. Find the first token at or after the hash
//! 2. Continue clockwise collecting healthy, not yet seen members
//! 3. Stop at N members or after every member has been visited
//!
//! # Performance
//!
//! - **Time**: O(log t + t) worst case where t = tokens, usually O(log t + r)
//! - **Space**: O(m) for the visited set, m = members

use std::time::SystemTime;

use corelib::{HealthPolicy, Ring};

use crate::placement::ReplicaSet;
use crate::strategy::{collect_replicas, ReplicationStrategy};

/// Simple replication strategy: N healthy replicas placed sequentially around
/// the ring.
///
/// # Example
///
/// ```rust
/// use std::time::SystemTime;
/// use corelib::{HealthPolicy, MemberState, MembershipSnapshot, Ring};
/// use corelib::health::unix_seconds;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let now = SystemTime::now();
/// let mut snapshot = MembershipSnapshot::new(1);
/// snapshot
///     .add_member("a", "10.0.0.1", vec![100], MemberState::Active, unix_seconds(now))
///     .add_member("b", "10.0.0.2", vec![200], MemberState::Joining, unix_seconds(now));
/// let ring = Ring::from_snapshot(&snapshot).unwrap();
///
/// let strategy = SimpleStrategy::new(HealthPolicy::default());
/// let replicas = strategy.replicas(&ring, 150, 1, now);
/// assert_eq!(replicas.addresses(), ["10.0.0.2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleStrategy {
    health: HealthPolicy,
}

impl SimpleStrategy {
    pub fn new(health: HealthPolicy) -> Self {
        Self { health }
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replicas(
        &self,
        ring: &Ring,
        hash: u32,
        replication_factor: usize,
        now: SystemTime,
    ) -> ReplicaSet {
        collect_replicas(ring, hash, replication_factor, &self.health, now, |_| 0)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
