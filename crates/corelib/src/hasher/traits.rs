//! Core hasher trait definitions.

use ulid::Ulid;

/// Converts a block identifier into a position on the ring.
///
/// Hashers are stateless and thread-safe. The output must be stable across
/// process restarts and identical on every member.
pub trait BlockHasher: Send + Sync + 'static {
    /// Hash raw identifier bytes to a ring position.
    fn hash(&self, key: &[u8]) -> u32;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;
}

/// Hash a block id over its 16 big-endian bytes.
pub fn hash_block_id(hasher: &dyn BlockHasher, id: &Ulid) -> u32 {
    hasher.hash(&id.to_bytes())
}
