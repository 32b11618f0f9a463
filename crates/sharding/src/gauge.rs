//! Transactional gauge for block sync outcomes.
//!
//! Every discovery cycle runs several filter stages. Each stage accumulates
//! the number of blocks it dropped under its own `state` label, and the whole
//! batch is published at once with [`SyncedGauge::submit`], so a scrape never
//! sees half of a cycle.

use std::collections::BTreeMap;

/// Gauge name the synced block counts are published under.
pub const SYNCED_METRIC: &str = "blocks_meta_synced";

/// Blocks dropped because another instance owns them.
pub const SHARD_EXCLUDED_META: &str = "shard-excluded";
/// Blocks kept after every filter stage.
pub const LOADED_META: &str = "loaded";

/// Where filter stages report per-state block counts.
pub trait MetaSyncSink {
    /// Accumulate `value` under `state` for the current cycle.
    fn add(&mut self, state: &'static str, value: f64);
}

/// Accumulate-then-submit gauge keyed by `state` label.
#[derive(Debug, Clone)]
pub struct SyncedGauge {
    name: &'static str,
    pending: BTreeMap<&'static str, f64>,
    submitted: BTreeMap<&'static str, f64>,
}

impl SyncedGauge {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: BTreeMap::new(),
            submitted: BTreeMap::new(),
        }
    }

    /// Overwrite the pending value for `state`.
    pub fn set(&mut self, state: &'static str, value: f64) {
        self.pending.insert(state, value);
    }

    /// Pending value for `state` in the current cycle.
    pub fn pending(&self, state: &str) -> f64 {
        self.pending.get(state).copied().unwrap_or_default()
    }

    /// Value published for `state` by the last submit.
    pub fn submitted(&self, state: &str) -> f64 {
        self.submitted.get(state).copied().unwrap_or_default()
    }

    /// Publish the pending batch and start a new cycle.
    ///
    /// States reported in the previous cycle but not in this one are reset to
    /// zero so stale values do not linger.
    pub fn submit(&mut self) {
        for state in self.submitted.keys() {
            if !self.pending.contains_key(state) {
                ::metrics::gauge!(self.name, "state" => *state).set(0.0);
            }
        }
        for (state, value) in &self.pending {
            ::metrics::gauge!(self.name, "state" => *state).set(*value);
        }
        self.submitted = std::mem::take(&mut self.pending);
    }
}

impl Default for SyncedGauge {
    fn default() -> Self {
        Self::new(SYNCED_METRIC)
    }
}

impl MetaSyncSink for SyncedGauge {
    fn add(&mut self, state: &'static str, value: f64) {
        *self.pending.entry(state).or_default() += value;
    }
}
