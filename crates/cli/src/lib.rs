//! CLI tool for inspecting store-gateway block sharding.
//!
//! Provides commands for:
//! - Filtering a block list down to the blocks an instance owns
//! - Printing the replica set of a block or hash
//! - Inspecting ring state (health, tokens, ownership)

pub mod commands;
pub mod config;
mod telemetry;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
