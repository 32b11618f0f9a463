//! Command line configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use corelib::{BlockHasher, Fnv32Hasher, HealthPolicy, MembershipSnapshot, Xxh3Hasher};
use replication::{ReplicationStrategy, SimpleStrategy, TransitionAwareStrategy};
use sharding::ShardingConfig;

use crate::commands::Command;
use crate::telemetry;

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "shardctl",
    version,
    about = "Evaluate store-gateway block sharding against a membership snapshot"
)]
pub struct CliConfig {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Execute the selected command and print its result.
    pub fn run(self) -> Result<()> {
        telemetry::init(&self.log_level);
        let result = self.command.execute(SystemTime::now())?;
        println!("{result}");
        Ok(())
    }
}

/// Block hash algorithm. Must match the rest of the cluster.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HasherKind {
    Fnv32,
    Xxh3,
}

impl HasherKind {
    pub fn build(self) -> Arc<dyn BlockHasher> {
        match self {
            HasherKind::Fnv32 => Arc::new(Fnv32Hasher),
            HasherKind::Xxh3 => Arc::new(Xxh3Hasher),
        }
    }
}

/// Replication policy.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Extra stable replica for every JOINING/LEAVING owner.
    TransitionAware,
    /// Exactly the replication factor, transitions ignored.
    Simple,
}

impl StrategyKind {
    pub fn build(self, health: HealthPolicy) -> Arc<dyn ReplicationStrategy> {
        match self {
            StrategyKind::TransitionAware => Arc::new(TransitionAwareStrategy::new(health)),
            StrategyKind::Simple => Arc::new(SimpleStrategy::new(health)),
        }
    }
}

/// Ring evaluation settings shared by the commands.
#[derive(Args, Debug, Clone)]
pub struct RingArgs {
    /// Membership snapshot as JSON.
    #[arg(short, long)]
    pub snapshot: PathBuf,

    #[arg(long, default_value_t = 3)]
    pub replication_factor: usize,

    /// Heartbeat timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub heartbeat_timeout: u64,

    #[arg(long, value_enum, default_value_t = HasherKind::Fnv32)]
    pub hasher: HasherKind,

    #[arg(long, value_enum, default_value_t = StrategyKind::TransitionAware)]
    pub strategy: StrategyKind,
}

impl RingArgs {
    pub fn sharding_config(&self, instance_addr: &str) -> ShardingConfig {
        ShardingConfig::new(instance_addr, self.replication_factor)
            .with_heartbeat_timeout(Duration::from_secs(self.heartbeat_timeout))
    }

    pub fn health_policy(&self) -> HealthPolicy {
        HealthPolicy::new(Duration::from_secs(self.heartbeat_timeout))
    }
}

/// Read a membership snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<MembershipSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}
