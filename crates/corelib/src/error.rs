//! Error types for the core library.

use crate::member::MemberId;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No usable membership snapshot has been observed yet, or the latest
    /// one was marked invalid by the propagation layer.
    #[error("ring unavailable: {0}")]
    RingUnavailable(String),

    /// Two members claim the same token. The snapshot revision is rejected.
    #[error("snapshot corrupt: token {token} is owned by both {first} and {second}")]
    SnapshotCorrupt {
        token: u32,
        first: MemberId,
        second: MemberId,
    },

    /// A member entry cannot be placed on the ring.
    #[error("invalid member: {0}")]
    InvalidMember(String),
}
