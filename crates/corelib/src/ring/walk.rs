//! Bounded clockwise walk over the token index.

use crate::member::Member;
use crate::ring::ring::Ring;

/// Position in a ring's sorted token index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor(pub(crate) usize);

impl Cursor {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One step of a ring walk.
#[derive(Copy, Clone, Debug)]
pub struct RingEntry<'a> {
    pub token: u32,
    /// Index of the owner in [`Ring::members`].
    pub member_index: usize,
    pub member: &'a Member,
}

/// Iterator over ring entries starting at a cursor, wrapping around once.
///
/// Yields every token exactly once, so a walk always terminates after at most
/// `token_count` steps. Restart by calling [`Ring::walk`] again.
#[derive(Clone, Debug)]
pub struct RingWalk<'a> {
    ring: &'a Ring,
    start: usize,
    step: usize,
}

impl<'a> RingWalk<'a> {
    pub(crate) fn new(ring: &'a Ring, cursor: Cursor) -> Self {
        Self {
            ring,
            start: cursor.0,
            step: 0,
        }
    }
}

impl<'a> Iterator for RingWalk<'a> {
    type Item = RingEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let ring = self.ring;
        let vnodes = ring.vnodes();
        if self.step >= vnodes.len() {
            return None;
        }
        let vnode = vnodes[(self.start + self.step) % vnodes.len()];
        self.step += 1;
        Some(RingEntry {
            token: vnode.token,
            member_index: vnode.owner,
            member: ring.member(vnode.owner),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.token_count().saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RingWalk<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberState;
    use crate::snapshot::MembershipSnapshot;

    fn ring() -> Ring {
        let mut s = MembershipSnapshot::new(1);
        s.add_member("a", "127.0.0.1", vec![10, 30], MemberState::Active, 0)
            .add_member("b", "127.0.0.2", vec![20], MemberState::Active, 0);
        Ring::from_snapshot(&s).unwrap()
    }

    #[test]
    fn test_walk_wraps_once() {
        let ring = ring();
        let tokens: Vec<u32> = ring.walk(ring.locate(25)).map(|e| e.token).collect();
        assert_eq!(tokens, vec![30, 10, 20]);
    }

    #[test]
    fn test_walk_resolves_owner() {
        let ring = ring();
        let owners: Vec<&str> = ring.walk(ring.locate(0)).map(|e| e.member.address.as_str()).collect();
        assert_eq!(owners, vec!["127.0.0.1", "127.0.0.2", "127.0.0.1"]);
    }

    #[test]
    fn test_walk_empty_ring() {
        let ring = Ring::from_snapshot(&MembershipSnapshot::new(1)).unwrap();
        assert_eq!(ring.walk(ring.locate(123)).count(), 0);
    }

    #[test]
    fn test_walk_is_restartable() {
        let ring = ring();
        let cursor = ring.locate(15);
        let first: Vec<u32> = ring.walk(cursor).map(|e| e.token).collect();
        let second: Vec<u32> = ring.walk(cursor).map(|e| e.token).collect();
        assert_eq!(first, second);
        assert_eq!(ring.walk(cursor).len(), 3);
    }
}
