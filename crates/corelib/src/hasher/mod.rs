//! Block hashing for ring placement.
//!
//! A hasher turns a block identifier into a 32-bit ring position. Every member
//! of the cluster must use the same hasher, otherwise members disagree on
//! ownership and blocks are dropped or double served.

pub mod fnv;
pub mod traits;
pub mod xxh3;

pub use fnv::Fnv32Hasher;
pub use traits::{hash_block_id, BlockHasher};
pub use xxh3::Xxh3Hasher;
