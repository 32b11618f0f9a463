//! Membership snapshots.
//!
//! A snapshot is the materialized view of cluster membership handed over by
//! the propagation layer. It is replaced wholesale on every update and never
//! mutated once published; the builder methods here exist for the code that
//! assembles a snapshot before handing it over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::member::{Member, MemberId, MemberState};

/// Immutable, versioned table of cluster members.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    /// Monotonically increasing revision counter.
    pub revision: u64,
    /// Members keyed by id.
    #[serde(default)]
    pub members: BTreeMap<MemberId, Member>,
    /// Set by the propagation layer when it cannot vouch for this revision.
    #[serde(default)]
    pub invalid: bool,
}

impl MembershipSnapshot {
    /// Create an empty snapshot at the given revision.
    pub fn new(revision: u64) -> Self {
        Self {
            revision,
            members: BTreeMap::new(),
            invalid: false,
        }
    }

    /// Add a member, replacing any previous entry with the same id.
    pub fn add_member(
        &mut self,
        id: impl Into<MemberId>,
        address: impl Into<String>,
        tokens: Vec<u32>,
        state: MemberState,
        last_heartbeat: i64,
    ) -> &mut Self {
        self.insert(Member::new(id, address, tokens, state, last_heartbeat));
        self
    }

    /// Insert a fully built member.
    pub fn insert(&mut self, member: Member) {
        self.members.insert(member.id.clone(), member);
    }

    /// Flag this revision as unusable.
    pub fn mark_invalid(&mut self) {
        self.invalid = true;
    }

    pub fn is_valid(&self) -> bool {
        !self.invalid
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
