//! Core library for store-gateway block sharding.
//!
//! This crate provides the building blocks the replication strategies work on:
//! - Members and immutable membership snapshots
//! - The sorted token index (`Ring`) with cyclic lookup and bounded walks
//! - The heartbeat health policy
//! - Block hashers
//! - `RingWatcher`, which publishes one ring per snapshot revision

pub mod error;
pub mod hasher;
pub mod health;
pub mod member;
pub mod ring;
pub mod snapshot;
pub mod vnode;
pub mod watcher;

pub use error::{Error, Result};
pub use hasher::{hash_block_id, BlockHasher, Fnv32Hasher, Xxh3Hasher};
pub use health::HealthPolicy;
pub use member::{Member, MemberId, MemberState};
pub use ring::{Cursor, Ring, RingEntry, RingWalk};
pub use snapshot::MembershipSnapshot;
pub use vnode::VirtualNode;
pub use watcher::{RingSource, RingWatcher};

pub use ulid::Ulid;
