//! shardctl subcommands.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use corelib::{hash_block_id, HealthPolicy, MemberState, MembershipSnapshot, Ring, RingWatcher, Ulid};
use replication::ReplicaSet;
use sharding::gauge::LOADED_META;
use sharding::{MetaSyncSink, ShardingMetadataFilter, SyncedGauge, SHARD_EXCLUDED_META};
use tracing::info;

use crate::config::{load_snapshot, RingArgs};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the blocks an instance owns out of a block list.
    Filter {
        #[command(flatten)]
        ring: RingArgs,

        /// Address the instance is registered under in the ring.
        #[arg(long)]
        instance_addr: String,

        /// File with one block ULID per line.
        #[arg(short, long)]
        blocks: PathBuf,
    },
    /// Print the ordered replica set of a block or raw hash.
    Replicas {
        #[command(flatten)]
        ring: RingArgs,

        #[arg(long, conflicts_with = "hash")]
        block: Option<Ulid>,

        #[arg(long)]
        hash: Option<u32>,
    },
    /// Show members with health, token count and ring ownership.
    Inspect {
        /// Membership snapshot as JSON.
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Heartbeat timeout in seconds.
        #[arg(long, default_value_t = 60)]
        heartbeat_timeout: u64,
    },
}

impl Command {
    pub fn execute(&self, now: SystemTime) -> Result<CommandResult> {
        match self {
            Command::Filter {
                ring,
                instance_addr,
                blocks,
            } => {
                let snapshot = load_snapshot(&ring.snapshot)?;
                let raw = fs::read_to_string(blocks)
                    .with_context(|| format!("reading block list {}", blocks.display()))?;
                let ids = parse_block_ids(&raw)?;
                filter_blocks(&snapshot, ring, instance_addr, ids, now)
            }
            Command::Replicas { ring, block, hash } => {
                let snapshot = load_snapshot(&ring.snapshot)?;
                replicas(&snapshot, ring, *block, *hash, now)
            }
            Command::Inspect {
                snapshot,
                heartbeat_timeout,
            } => {
                let snapshot = load_snapshot(snapshot)?;
                let policy = HealthPolicy::new(Duration::from_secs(*heartbeat_timeout));
                inspect(&snapshot, &policy, now)
            }
        }
    }
}

/// Parse a block list: one ULID per line, blank lines and `#` comments ignored.
pub fn parse_block_ids(raw: &str) -> Result<Vec<Ulid>> {
    raw.lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            Ulid::from_string(line).with_context(|| format!("line {n}: invalid block id {line:?}"))
        })
        .collect()
}

/// Publish `snapshot` the way a store-gateway would, so commands see the same
/// ring, or the same `RingUnavailable`, as the filter.
fn publish(snapshot: &MembershipSnapshot) -> Result<Arc<RingWatcher>> {
    let watcher = Arc::new(RingWatcher::new());
    watcher
        .observe(snapshot)
        .with_context(|| format!("building ring from revision {}", snapshot.revision))?;
    Ok(watcher)
}

fn current_ring(snapshot: &MembershipSnapshot) -> Result<Arc<Ring>> {
    Ok(publish(snapshot)?.current()?)
}

/// Run the sharding filter for `instance_addr` over `ids`.
pub fn filter_blocks(
    snapshot: &MembershipSnapshot,
    args: &RingArgs,
    instance_addr: &str,
    ids: Vec<Ulid>,
    now: SystemTime,
) -> Result<CommandResult> {
    let watcher = publish(snapshot)?;

    let config = args.sharding_config(instance_addr);
    let filter = ShardingMetadataFilter::new(watcher, &config)?
        .with_strategy(args.strategy.build(config.health_policy()))
        .with_hasher(args.hasher.build());

    let mut metas: HashMap<Ulid, ()> = ids.into_iter().map(|id| (id, ())).collect();
    let mut synced = SyncedGauge::default();
    filter.filter_at(&mut metas, &mut synced, now)?;
    synced.add(LOADED_META, metas.len() as f64);
    let excluded = synced.pending(SHARD_EXCLUDED_META) as usize;
    synced.submit();

    let mut kept: Vec<Ulid> = metas.into_keys().collect();
    kept.sort();
    info!(instance = instance_addr, kept = kept.len(), excluded, "filter finished");

    Ok(CommandResult::Filtered {
        instance_addr: instance_addr.to_string(),
        kept,
        excluded,
    })
}

/// Replica set for a block id or a raw hash; exactly one must be given.
pub fn replicas(
    snapshot: &MembershipSnapshot,
    args: &RingArgs,
    block: Option<Ulid>,
    hash: Option<u32>,
    now: SystemTime,
) -> Result<CommandResult> {
    let hash = match (block, hash) {
        (Some(id), None) => hash_block_id(args.hasher.build().as_ref(), &id),
        (None, Some(hash)) => hash,
        _ => bail!("exactly one of --block or --hash is required"),
    };
    if args.replication_factor == 0 {
        bail!("replication factor must be at least 1");
    }

    let ring = current_ring(snapshot)?;
    let strategy = args.strategy.build(args.health_policy());
    let replicas = strategy.replicas(&ring, hash, args.replication_factor, now);
    Ok(CommandResult::Replicas { hash, replicas })
}

/// Per member health and ownership summary.
pub fn inspect(
    snapshot: &MembershipSnapshot,
    policy: &HealthPolicy,
    now: SystemTime,
) -> Result<CommandResult> {
    let ring = current_ring(snapshot)?;
    let members = ring
        .members()
        .iter()
        .zip(ring.ownership())
        .map(|(member, (_, ownership))| MemberReport {
            id: member.id.to_string(),
            address: member.address.clone(),
            state: member.state,
            healthy: policy.is_healthy(member, now),
            tokens: member.tokens.len(),
            ownership,
        })
        .collect();

    Ok(CommandResult::Inspected {
        revision: ring.revision(),
        members,
    })
}

/// One row of `shardctl inspect`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberReport {
    pub id: String,
    pub address: String,
    pub state: MemberState,
    pub healthy: bool,
    pub tokens: usize,
    /// Fraction of the hash space, 0.0 to 1.0.
    pub ownership: f64,
}

/// Output of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Filtered {
        instance_addr: String,
        kept: Vec<Ulid>,
        excluded: usize,
    },
    Replicas {
        hash: u32,
        replicas: ReplicaSet,
    },
    Inspected {
        revision: u64,
        members: Vec<MemberReport>,
    },
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Filtered {
                instance_addr,
                kept,
                excluded,
            } => {
                for id in kept {
                    writeln!(f, "{id}")?;
                }
                write!(f, "# {instance_addr}: {} kept, {excluded} excluded by sharding", kept.len())
            }
            CommandResult::Replicas { hash, replicas } => {
                write!(f, "hash {hash}: {replicas}")
            }
            CommandResult::Inspected { revision, members } => {
                writeln!(f, "revision {revision}")?;
                write!(
                    f,
                    "{:<20} {:<24} {:<8} {:<8} {:>6} {:>9}",
                    "ID", "ADDRESS", "STATE", "HEALTHY", "TOKENS", "OWNERSHIP"
                )?;
                for m in members {
                    write!(
                        f,
                        "\n{:<20} {:<24} {:<8} {:<8} {:>6} {:>8.2}%",
                        m.id,
                        m.address,
                        m.state.to_string(),
                        m.healthy,
                        m.tokens,
                        m.ownership * 100.0
                    )?;
                }
                Ok(())
            }
        }
    }
}
