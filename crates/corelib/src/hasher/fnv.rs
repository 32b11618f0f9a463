//! 32-bit FNV-1 hasher.

use crate::hasher::traits::BlockHasher;

const OFFSET32: u32 = 2_166_136_261;
const PRIME32: u32 = 16_777_619;

/// FNV-1 (multiply, then xor) over 32 bits.
///
/// This is the block hash already used by deployed store-gateways, so it is
/// the default: mixing hashers within one cluster breaks ownership.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv32Hasher;

impl BlockHasher for Fnv32Hasher {
    fn hash(&self, key: &[u8]) -> u32 {
        key.iter().fold(OFFSET32, |h, &b| h.wrapping_mul(PRIME32) ^ u32::from(b))
    }

    fn name(&self) -> &'static str {
        "fnv32"
    }
}
