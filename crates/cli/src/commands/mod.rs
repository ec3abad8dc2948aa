// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

mod dispatch;
mod registry;
mod runtime;
mod watchdog;

use std::path::PathBuf;

use clap::Subcommand;

/// Global options every subcommand needs to reach the registry and the
/// Kubernetes namespace sprites live in.
pub struct Context {
    pub registry: PathBuf,
    pub namespace: String,
    pub pod_image: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dispatch a sprite to run a prompt or tracked issue
    Dispatch(dispatch::DispatchArgs),
    /// Inspect and manage the worker registry
    #[command(subcommand)]
    Registry(registry::RegistryCommand),
    /// Poll sprites and classify their lifecycle state
    Watchdog(watchdog::WatchdogArgs),
}

pub async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Dispatch(args) => dispatch::run(args, ctx).await,
        Command::Registry(cmd) => registry::run(cmd, ctx).await,
        Command::Watchdog(args) => watchdog::run(args, ctx).await,
    }
}
