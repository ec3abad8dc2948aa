// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj registry`: inspect and seed the worker registry directly,
//! bypassing dispatch (spec §4.3, C3).

use clap::Subcommand;
use oj_storage::lock::with_locked_worker_registry;
use oj_storage::WorkerRegistry;

use super::Context;
use crate::color;

#[derive(Subcommand)]
pub enum RegistryCommand {
    /// Create an empty registry file if one doesn't already exist
    Init,
    /// List every sprite name the registry knows about
    List,
    /// Show one sprite's registry entry
    Show {
        /// Sprite name
        name: String,
    },
    /// Register a sprite against an existing machine id, bypassing provisioning
    Register {
        /// Sprite name
        name: String,
        /// Machine id to associate with the sprite
        machine_id: String,
    },
}

pub async fn run(command: RegistryCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        RegistryCommand::Init => {
            let registry = WorkerRegistry::load(&ctx.registry)?;
            registry.save()?;
            println!("{}", color::header(&format!("registry initialized at {}", ctx.registry.display())));
        }
        RegistryCommand::List => {
            let registry = WorkerRegistry::load(&ctx.registry)?;
            for name in registry.names() {
                println!("{}", color::literal(name));
            }
        }
        RegistryCommand::Show { name } => {
            let registry = WorkerRegistry::load(&ctx.registry)?;
            let entry = registry
                .lookup_name(&name)
                .ok_or_else(|| anyhow::anyhow!("sprite \"{name}\" not found in registry"))?;
            println!("{}: {}", color::header(&name), color::literal(&entry.machine_id));
            println!("  created: {}", entry.created_at);
            if let Some(issue) = &entry.assigned_issue {
                println!("  assigned issue: {issue}");
            }
            if let Some(repo) = &entry.assigned_repo {
                println!("  assigned repo: {repo}");
            }
        }
        RegistryCommand::Register { name, machine_id } => {
            with_locked_worker_registry(&ctx.registry, || false, |reg| reg.register(&name, &machine_id))?;
            println!("{}", color::header(&format!("registered {name} -> {machine_id}")));
        }
    }
    Ok(())
}
