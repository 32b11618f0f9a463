//! Member abstractions for the token ring.
//!
//! Members are the store-gateway replicas participating in the ring. They are
//! identified by an opaque, stable `MemberId` and routed to by `address`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a ring member, stable for the member's lifetime.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle state of a member as published by the propagation layer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberState {
    Active,
    Joining,
    Leaving,
    /// Removed from the cluster. Never placed on the ring.
    Left,
}

impl MemberState {
    /// True while the member is moving into or out of the ring.
    pub fn is_transitioning(self) -> bool {
        matches!(self, MemberState::Joining | MemberState::Leaving)
    }
}

impl fmt::Display for MemberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberState::Active => "ACTIVE",
            MemberState::Joining => "JOINING",
            MemberState::Leaving => "LEAVING",
            MemberState::Left => "LEFT",
        };
        f.write_str(s)
    }
}

/// One cluster participant.
///
/// Cheap to clone; the core never mutates a published member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Network endpoint. Also the identity compared against the local
    /// instance when deciding ownership.
    pub address: String,
    /// Ring positions owned by this member.
    #[serde(default)]
    pub tokens: Vec<u32>,
    pub state: MemberState,
    /// Unix seconds of the last heartbeat, maintained externally.
    #[serde(default)]
    pub last_heartbeat: i64,
}

impl Member {
    /// Construct a member with basic metadata.
    pub fn new(
        id: impl Into<MemberId>,
        address: impl Into<String>,
        tokens: Vec<u32>,
        state: MemberState,
        last_heartbeat: i64,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            tokens,
            state,
            last_heartbeat,
        }
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
