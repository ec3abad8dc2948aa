// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj`: the sprite dispatch & supervision CLI.

mod color;
mod commands;
mod exit_error;

use std::path::PathBuf;

use clap::Parser;
use exit_error::ExitError;

/// `$XDG_DATA_HOME/oj/registry.toml` (or the platform equivalent),
/// falling back to the current directory if it can't be resolved.
fn default_registry_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("oj").join("registry.toml")
}

#[derive(Parser)]
#[command(name = "oj", version, styles = color::styles())]
struct Cli {
    /// Path to the worker registry file
    #[arg(long, global = true, default_value_os_t = default_registry_path())]
    registry: PathBuf,

    /// Kubernetes namespace sprites are provisioned into
    #[arg(long, global = true, default_value = "oj-sprites")]
    namespace: String,

    /// Container image used for newly-provisioned sprites
    #[arg(long, global = true, default_value = "ghcr.io/example/sprite-worker:latest")]
    pod_image: String,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context { registry: cli.registry, namespace: cli.namespace, pod_image: cli.pod_image };

    if let Err(err) = commands::run(cli.command, &ctx).await {
        eprintln!("{}", color::context(&format!("error: {err}")));
        std::process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map(|e| e.code).unwrap_or(1)
}
