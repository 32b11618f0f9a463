//! Replication strategies for block ownership.
//!
//! This crate provides pluggable replication strategies that determine which
//! ring members own a given hash:
//! - `TransitionAwareStrategy`: health filtered walk that adds one stable
//!   replica per JOINING/LEAVING member crossed (default for blocks)
//! - `SimpleStrategy`: health filtered walk without the transition extension

pub mod placement;
pub mod strategy;

pub use placement::ReplicaSet;
pub use strategy::{ReplicationStrategy, SimpleStrategy, TransitionAwareStrategy};
