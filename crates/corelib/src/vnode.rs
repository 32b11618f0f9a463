//! Virtual node abstractions.
//!
//! Each member holds many tokens on the 32-bit ring. A `VirtualNode` is one of
//! those tokens paired with the index of the member that owns it inside a
//! [`Ring`](crate::ring::Ring). Keeping an index instead of the member id
//! keeps the token index a flat array of small `Copy` values.

use std::fmt;

/// A single token position owned by a member.
///
/// # Invariants
///
/// - Within one ring, no two virtual nodes share a token.
/// - `owner` is a valid index into the ring's member table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: u32,
    /// Index of the owning member in the ring's member table.
    pub owner: usize,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: u32, owner: usize) -> Self {
        Self { token, owner }
    }

    /// Clockwise distance from `self` to `other`, wrapping at 2^32.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u32 {
        other.token.wrapping_sub(self.token)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={:08x}, owner={})", self.token, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnode_distance() {
        let a = VirtualNode::new(100, 0);
        let b = VirtualNode::new(200, 1);
        assert_eq!(a.distance_to(&b), 100);
    }

    #[test]
    fn test_vnode_distance_wraps() {
        let a = VirtualNode::new(u32::MAX - 9, 0);
        let b = VirtualNode::new(10, 1);
        assert_eq!(a.distance_to(&b), 20);
    }

    #[test]
    fn test_vnode_ordering() {
        assert!(VirtualNode::new(100, 5) < VirtualNode::new(200, 0));
    }
}
