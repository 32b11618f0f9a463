//! Block metadata filter keeping only the blocks this instance owns.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;
use std::time::SystemTime;

use corelib::{hash_block_id, BlockHasher, Fnv32Hasher, RingSource, Ulid};
use replication::{ReplicaSet, ReplicationStrategy, TransitionAwareStrategy};
use tracing::debug;

use crate::config::ShardingConfig;
use crate::error::ShardingError;
use crate::gauge::{MetaSyncSink, SHARD_EXCLUDED_META};

/// Removes blocks owned by other store-gateway instances.
///
/// Stateless between calls: every call takes the current ring from the
/// [`RingSource`] once and evaluates every block against that same revision.
/// Safe to share between sync loops.
pub struct ShardingMetadataFilter {
    ring: Arc<dyn RingSource>,
    strategy: Arc<dyn ReplicationStrategy>,
    hasher: Arc<dyn BlockHasher>,
    instance_addr: String,
    replication_factor: usize,
}

impl ShardingMetadataFilter {
    /// Create a filter with the transition aware strategy and FNV block hash.
    pub fn new(ring: Arc<dyn RingSource>, config: &ShardingConfig) -> Result<Self, ShardingError> {
        config.validate()?;
        Ok(Self {
            ring,
            strategy: Arc::new(TransitionAwareStrategy::new(config.health_policy())),
            hasher: Arc::new(Fnv32Hasher),
            instance_addr: config.instance_addr.clone(),
            replication_factor: config.replication_factor,
        })
    }

    /// Replace the replication strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn ReplicationStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the block hasher. Must match every other instance.
    pub fn with_hasher(mut self, hasher: Arc<dyn BlockHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn instance_addr(&self) -> &str {
        &self.instance_addr
    }

    pub fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    /// Drop every block this instance does not own, evaluated now.
    ///
    /// See [`filter_at`](Self::filter_at).
    pub fn filter<M, S: BuildHasher>(
        &self,
        metas: &mut HashMap<Ulid, M, S>,
        synced: &mut dyn MetaSyncSink,
    ) -> Result<(), ShardingError> {
        self.filter_at(metas, synced, SystemTime::now())
    }

    /// Drop every block this instance does not own at `now`.
    ///
    /// `metas` is filtered in place and the number of removed blocks is added
    /// to `synced` under [`SHARD_EXCLUDED_META`]. Fails without touching
    /// `metas` when the ring is unavailable. A block with no owner at all is
    /// simply removed.
    pub fn filter_at<M, S: BuildHasher>(
        &self,
        metas: &mut HashMap<Ulid, M, S>,
        synced: &mut dyn MetaSyncSink,
        now: SystemTime,
    ) -> Result<(), ShardingError> {
        let ring = self.ring.ring()?;
        let before = metas.len();

        metas.retain(|id, _| {
            let hash = hash_block_id(self.hasher.as_ref(), id);
            self.strategy
                .replicas(&ring, hash, self.replication_factor, now)
                .contains(&self.instance_addr)
        });

        let excluded = before - metas.len();
        synced.add(SHARD_EXCLUDED_META, excluded as f64);
        debug!(
            instance = %self.instance_addr,
            revision = ring.revision(),
            strategy = self.strategy.name(),
            kept = metas.len(),
            excluded,
            "filtered blocks by shard"
        );
        Ok(())
    }

    /// Owners of one block at `now`.
    pub fn replicas_for_at(&self, id: &Ulid, now: SystemTime) -> Result<ReplicaSet, ShardingError> {
        let ring = self.ring.ring()?;
        let hash = hash_block_id(self.hasher.as_ref(), id);
        Ok(self.strategy.replicas(&ring, hash, self.replication_factor, now))
    }

    pub fn replicas_for(&self, id: &Ulid) -> Result<ReplicaSet, ShardingError> {
        self.replicas_for_at(id, SystemTime::now())
    }

    /// True if this instance is among the owners of `id` at `now`.
    pub fn owns_at(&self, id: &Ulid, now: SystemTime) -> Result<bool, ShardingError> {
        Ok(self.replicas_for_at(id, now)?.contains(&self.instance_addr))
    }

    pub fn owns(&self, id: &Ulid) -> Result<bool, ShardingError> {
        self.owns_at(id, SystemTime::now())
    }
}

impl std::fmt::Debug for ShardingMetadataFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardingMetadataFilter")
            .field("instance_addr", &self.instance_addr)
            .field("replication_factor", &self.replication_factor)
            .field("strategy", &self.strategy.name())
            .field("hasher", &self.hasher.name())
            .finish_non_exhaustive()
    }
}
