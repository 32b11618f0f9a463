//! Replica placement results.

use std::fmt;

/// Ordered, deduplicated member addresses owning one hash.
///
/// Normally as long as the replication factor. Shorter when not enough
/// healthy members exist; longer when the walk crossed JOINING or LEAVING
/// members. Computed per query and never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplicaSet {
    addresses: Vec<String>,
}

impl ReplicaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            addresses: Vec::with_capacity(capacity),
        }
    }

    /// Append an address in walk order. Callers dedupe by member before this.
    pub(crate) fn push(&mut self, address: String) {
        debug_assert!(!self.contains(&address));
        self.addresses.push(address);
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Primary owner, i.e. the first healthy member met on the walk.
    pub fn primary(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn into_addresses(self) -> Vec<String> {
        self.addresses
    }
}

impl fmt::Display for ReplicaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.addresses.join(", "))
    }
}

impl FromIterator<String> for ReplicaSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = ReplicaSet::new();
        for address in iter {
            if !set.contains(&address) {
                set.addresses.push(address);
            }
        }
        set
    }
}
