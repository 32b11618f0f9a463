//! Error types for the sharding crate.

/// Errors produced by the sharding filter.
#[derive(Debug, thiserror::Error)]
pub enum ShardingError {
    /// The ring could not be obtained, see [`corelib::Error::RingUnavailable`].
    #[error(transparent)]
    Ring(#[from] corelib::Error),

    /// The configuration supplied by the embedding process is unusable.
    #[error("invalid sharding config: {0}")]
    InvalidConfig(String),
}

impl ShardingError {
    /// True when filtering was skipped because no usable ring exists yet.
    pub fn is_ring_unavailable(&self) -> bool {
        matches!(self, ShardingError::Ring(corelib::Error::RingUnavailable(_)))
    }
}
