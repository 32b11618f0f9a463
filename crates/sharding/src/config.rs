//! Sharding configuration supplied by the embedding process.

use std::time::Duration;

use corelib::HealthPolicy;
use serde::{Deserialize, Deserializer};

use crate::error::ShardingError;

const DEFAULT_REPLICATION_FACTOR: usize = 3;
const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(60);

/// Ring settings for one store-gateway instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShardingConfig {
    /// Address this instance registers in the ring under.
    pub instance_addr: String,
    /// Nominal number of instances owning each block.
    pub replication_factor: usize,
    /// Heartbeat staleness threshold, in seconds when deserialized.
    #[serde(deserialize_with = "duration_from_secs")]
    pub heartbeat_timeout: Duration,
}

impl ShardingConfig {
    pub fn new(instance_addr: impl Into<String>, replication_factor: usize) -> Self {
        Self {
            instance_addr: instance_addr.into(),
            replication_factor,
            ..Self::default()
        }
    }

    pub fn with_heartbeat_timeout(mut self, heartbeat_timeout: Duration) -> Self {
        self.heartbeat_timeout = heartbeat_timeout;
        self
    }

    pub fn validate(&self) -> Result<(), ShardingError> {
        if self.instance_addr.is_empty() {
            return Err(ShardingError::InvalidConfig(
                "instance address must not be empty".to_string(),
            ));
        }
        if self.replication_factor == 0 {
            return Err(ShardingError::InvalidConfig(
                "replication factor must be at least 1".to_string(),
            ));
        }
        if self.heartbeat_timeout.is_zero() {
            return Err(ShardingError::InvalidConfig(
                "heartbeat timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn health_policy(&self) -> HealthPolicy {
        HealthPolicy::new(self.heartbeat_timeout)
    }
}

impl Default for ShardingConfig {
    fn default() -> Self {
        Self {
            instance_addr: String::new(),
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            heartbeat_timeout: DEFAULT_HEARTBEAT_TIMEOUT,
        }
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShardingConfig::new("127.0.0.1", 3);
        assert_eq!(config.heartbeat_timeout, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ShardingConfig =
            serde_json::from_str(r#"{"instance_addr": "10.0.0.7:9095", "heartbeat_timeout": 15}"#)
                .unwrap();
        assert_eq!(config.instance_addr, "10.0.0.7:9095");
        assert_eq!(config.replication_factor, 3);
        assert_eq!(config.heartbeat_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ShardingConfig::new("", 1).validate().is_err());
        assert!(ShardingConfig::new("127.0.0.1", 0).validate().is_err());
        assert!(ShardingConfig::new("127.0.0.1", 1)
            .with_heartbeat_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
