//! Publishing of ring revisions to concurrent readers.
//!
//! The propagation layer hands over whole snapshots; [`RingWatcher`] builds a
//! [`Ring`] for each new revision and swaps it in behind an `Arc`. Readers take
//! a clone of the `Arc` and keep using it for the rest of their evaluation, so
//! a swap never affects an evaluation already in flight.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ring::Ring;
use crate::snapshot::MembershipSnapshot;

/// Something that can hand out the ring to evaluate against.
pub trait RingSource: Send + Sync {
    /// The current ring, or [`Error::RingUnavailable`].
    fn ring(&self) -> Result<Arc<Ring>>;
}

impl RingSource for Arc<Ring> {
    fn ring(&self) -> Result<Arc<Ring>> {
        Ok(Arc::clone(self))
    }
}

#[derive(Debug, Default)]
struct Published {
    /// Last ring successfully built.
    ring: Option<Arc<Ring>>,
    /// Highest revision accepted, valid or not.
    revision: Option<u64>,
    /// The accepted revision was flagged invalid upstream.
    invalid: bool,
}

/// Holds the ring for the most recent usable snapshot revision.
///
/// The lock only guards the pointer swap; ring construction happens outside
/// of it, so readers of the previous revision are never blocked by a rebuild.
#[derive(Debug, Default)]
pub struct RingWatcher {
    published: RwLock<Published>,
}

impl RingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a snapshot from the propagation layer.
    ///
    /// - a revision at or below the last accepted one is ignored;
    /// - an invalid snapshot makes the ring unavailable until a valid one
    ///   arrives;
    /// - a corrupt snapshot is rejected with [`Error::SnapshotCorrupt`] and the
    ///   previous ring keeps being served.
    pub fn observe(&self, snapshot: &MembershipSnapshot) -> Result<()> {
        let revision = snapshot.revision;
        if let Some(current) = self.published.read().revision {
            if revision <= current {
                debug!(revision, current, "ignoring stale membership snapshot");
                return Ok(());
            }
        }

        if !snapshot.is_valid() {
            let mut published = self.published.write();
            if published.revision.map_or(true, |current| revision > current) {
                warn!(revision, "membership snapshot marked invalid, ring unavailable");
                published.revision = Some(revision);
                published.invalid = true;
            }
            return Ok(());
        }

        let ring = match Ring::from_snapshot(snapshot) {
            Ok(ring) => Arc::new(ring),
            Err(err) => {
                warn!(revision, error = %err, "rejecting membership snapshot, keeping previous ring");
                return Err(err);
            }
        };

        let mut published = self.published.write();
        if published.revision.map_or(false, |current| revision <= current) {
            debug!(revision, "newer membership snapshot installed concurrently");
            return Ok(());
        }
        info!(
            revision,
            members = ring.member_count(),
            tokens = ring.token_count(),
            "installed ring revision"
        );
        published.ring = Some(ring);
        published.revision = Some(revision);
        published.invalid = false;
        Ok(())
    }

    /// The current ring.
    pub fn current(&self) -> Result<Arc<Ring>> {
        let published = self.published.read();
        if published.invalid {
            return Err(Error::RingUnavailable(format!(
                "membership snapshot revision {} is marked invalid",
                published.revision.unwrap_or_default()
            )));
        }
        published
            .ring
            .clone()
            .ok_or_else(|| Error::RingUnavailable("no membership snapshot observed yet".to_string()))
    }

    /// Highest revision accepted so far.
    pub fn revision(&self) -> Option<u64> {
        self.published.read().revision
    }
}

impl RingSource for RingWatcher {
    fn ring(&self) -> Result<Arc<Ring>> {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberState;

    fn snapshot(revision: u64, tokens: &[u32]) -> MembershipSnapshot {
        let mut s = MembershipSnapshot::new(revision);
        s.add_member("a", "127.0.0.1", tokens.to_vec(), MemberState::Active, 0);
        s
    }

    #[test]
    fn test_cold_start_is_unavailable() {
        let watcher = RingWatcher::new();
        assert!(matches!(watcher.current(), Err(Error::RingUnavailable(_))));
        assert_eq!(watcher.revision(), None);
    }

    #[test]
    fn test_observe_installs_newer_revision() {
        let watcher = RingWatcher::new();
        watcher.observe(&snapshot(1, &[1])).unwrap();
        watcher.observe(&snapshot(2, &[1, 2])).unwrap();
        assert_eq!(watcher.current().unwrap().revision(), 2);
        assert_eq!(watcher.current().unwrap().token_count(), 2);
    }

    #[test]
    fn test_stale_revision_ignored() {
        let watcher = RingWatcher::new();
        watcher.observe(&snapshot(5, &[1])).unwrap();
        watcher.observe(&snapshot(4, &[1, 2, 3])).unwrap();
        assert_eq!(watcher.current().unwrap().revision(), 5);
        assert_eq!(watcher.current().unwrap().token_count(), 1);
    }

    #[test]
    fn test_reader_keeps_old_revision_after_swap() {
        let watcher = RingWatcher::new();
        watcher.observe(&snapshot(1, &[1])).unwrap();
        let held = watcher.current().unwrap();
        watcher.observe(&snapshot(2, &[1, 2])).unwrap();
        assert_eq!(held.revision(), 1);
        assert_eq!(watcher.current().unwrap().revision(), 2);
    }
}
