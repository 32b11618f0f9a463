//! Store-gateway block sharding.
//!
//! Each store-gateway replica independently keeps the blocks it owns and drops
//! the rest, using only its own view of the ring:
//! - [`ShardingMetadataFilter`] applies a replication strategy to a discovered
//!   block list
//! - [`ShardingConfig`] is the configuration surface supplied by the embedding
//!   process
//! - [`SyncedGauge`] reports exclusions per filter stage

mod config;
mod error;
mod filter;
pub mod gauge;

pub use config::ShardingConfig;
pub use error::ShardingError;
pub use filter::ShardingMetadataFilter;
pub use gauge::{MetaSyncSink, SyncedGauge, SHARD_EXCLUDED_META};
