//! XXH3 based hasher.

use crate::hasher::traits::BlockHasher;
use xxhash_rust::xxh3::xxh3_64;

/// XXH3-64 truncated to its low 32 bits.
///
/// Better spread than FNV for short keys; only for clusters where every
/// member is configured with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl BlockHasher for Xxh3Hasher {
    fn hash(&self, key: &[u8]) -> u32 {
        xxh3_64(key) as u32
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
