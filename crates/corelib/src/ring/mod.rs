//! Token ring implementation.
//!
//! The ring is a flat, sorted projection of every member's tokens built from
//! one membership snapshot. It is never mutated after construction: a new
//! snapshot revision produces a new ring which replaces the old one wholesale.

pub mod ring;
pub mod walk;

pub use ring::Ring;
pub use walk::{Cursor, RingEntry, RingWalk};
