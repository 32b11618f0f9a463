//! Heartbeat based health policy.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::member::Member;

/// Default staleness threshold, matching the store-gateway ring default.
pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(60);

/// Decides whether a member is healthy from the age of its last heartbeat.
///
/// Pure: no memory of past evaluations, no side effects. A member whose
/// heartbeat has expired is unhealthy regardless of its declared state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HealthPolicy {
    heartbeat_timeout: Duration,
}

impl HealthPolicy {
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self { heartbeat_timeout }
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        self.heartbeat_timeout
    }

    /// `now - member.last_heartbeat <= heartbeat_timeout`.
    ///
    /// Heartbeats from the future (clock skew) count as fresh.
    pub fn is_healthy(&self, member: &Member, now: SystemTime) -> bool {
        let Some(heartbeat) = from_unix_seconds(member.last_heartbeat) else {
            return member.last_heartbeat > 0;
        };
        match now.duration_since(heartbeat) {
            Ok(age) => age <= self.heartbeat_timeout,
            Err(_) => true,
        }
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HEARTBEAT_TIMEOUT)
    }
}

/// Seconds since the Unix epoch; instants before the epoch are negative.
pub fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

/// Instant for a Unix timestamp in seconds, `None` if it is out of range.
fn from_unix_seconds(secs: i64) -> Option<SystemTime> {
    let offset = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}
