//! Sorted token index built from a membership snapshot.

use std::time::SystemTime;

use tracing::debug;

use crate::error::{Error, Result};
use crate::health::HealthPolicy;
use crate::member::{Member, MemberId, MemberState};
use crate::ring::walk::{Cursor, RingWalk};
use crate::snapshot::MembershipSnapshot;
use crate::vnode::VirtualNode;

const RING_SIZE: f64 = 4_294_967_296.0;

/// Token index for one snapshot revision.
///
/// Members are stored once; the token index refers to them by position, so a
/// member with hundreds of tokens is not cloned hundreds of times.
#[derive(Debug, Clone)]
pub struct Ring {
    revision: u64,
    members: Vec<Member>,
    /// Ascending by token.
    vnodes: Vec<VirtualNode>,
    /// Members holding at least one token.
    members_on_ring: usize,
}

impl Ring {
    /// Build the token index for a snapshot.
    ///
    /// `LEFT` members are dropped. Fails with [`Error::SnapshotCorrupt`] if two
    /// members share a token, and with [`Error::InvalidMember`] if a member has
    /// no address.
    pub fn from_snapshot(snapshot: &MembershipSnapshot) -> Result<Self> {
        let mut members = Vec::with_capacity(snapshot.len());
        for member in snapshot.members.values() {
            if member.state == MemberState::Left {
                debug!(member = %member.id, "skipping LEFT member");
                continue;
            }
            if member.address.is_empty() {
                return Err(Error::InvalidMember(format!(
                    "member {} has an empty address",
                    member.id
                )));
            }
            members.push(member.clone());
        }

        let mut vnodes: Vec<VirtualNode> = members
            .iter()
            .enumerate()
            .flat_map(|(owner, m)| m.tokens.iter().map(move |&t| VirtualNode::new(t, owner)))
            .collect();
        vnodes.sort_unstable();
        // A member listing one of its own tokens twice is harmless.
        vnodes.dedup();

        if let Some(pair) = vnodes.windows(2).find(|w| w[0].token == w[1].token) {
            return Err(Error::SnapshotCorrupt {
                token: pair[0].token,
                first: members[pair[0].owner].id.clone(),
                second: members[pair[1].owner].id.clone(),
            });
        }

        let members_on_ring = members.iter().filter(|m| !m.tokens.is_empty()).count();

        Ok(Self {
            revision: snapshot.revision,
            members,
            vnodes,
            members_on_ring,
        })
    }

    /// Snapshot revision this ring was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All members, including those without tokens.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Member at `index` in the member table.
    ///
    /// Panics if `index` did not come from this ring.
    pub fn member(&self, index: usize) -> &Member {
        &self.members[index]
    }

    pub fn member_by_id(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of distinct members reachable by a ring walk.
    pub fn members_on_ring(&self) -> usize {
        self.members_on_ring
    }

    pub fn token_count(&self) -> usize {
        self.vnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }

    /// The sorted token index.
    pub fn vnodes(&self) -> &[VirtualNode] {
        &self.vnodes
    }

    /// True if a member with this address is part of the ring.
    pub fn has_instance(&self, address: &str) -> bool {
        self.members.iter().any(|m| m.address == address)
    }

    pub fn healthy_members<'a>(
        &'a self,
        policy: &'a HealthPolicy,
        now: SystemTime,
    ) -> impl Iterator<Item = &'a Member> + 'a {
        self.members.iter().filter(move |m| policy.is_healthy(m, now))
    }

    /// Cursor at the first token `>= hash`, wrapping to the start of the ring.
    pub fn locate(&self, hash: u32) -> Cursor {
        let idx = self.vnodes.partition_point(|v| v.token < hash);
        if idx == self.vnodes.len() {
            Cursor(0)
        } else {
            Cursor(idx)
        }
    }

    /// Walk the ring clockwise from `cursor`, at most one full revolution.
    pub fn walk(&self, cursor: Cursor) -> RingWalk<'_> {
        RingWalk::new(self, cursor)
    }

    /// Fraction of the hash space owned by each member, in member order.
    ///
    /// A token owns the range ending at it (exclusive of the previous token),
    /// since a hash is placed at the first token at or after it.
    pub fn ownership(&self) -> Vec<(MemberId, f64)> {
        let mut owned = vec![0u64; self.members.len()];
        match self.vnodes.len() {
            0 => {}
            1 => owned[self.vnodes[0].owner] = 1 << 32,
            n => {
                for (i, vnode) in self.vnodes.iter().enumerate() {
                    let prev = &self.vnodes[(i + n - 1) % n];
                    owned[vnode.owner] += u64::from(prev.distance_to(vnode));
                }
            }
        }

        self.members
            .iter()
            .zip(owned)
            .map(|(m, range)| (m.id.clone(), range as f64 / RING_SIZE))
            .collect()
    }
}
