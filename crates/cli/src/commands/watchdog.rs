// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj watchdog`: probe every registered sprite and classify its
//! lifecycle state (spec §4.9, C9). Reports only; remediation is left
//! to the operator or a future `oj watchdog act` (see recommended
//! action column).

use clap::Args;
use oj_adapters::RemoteClient;
use oj_core::{RepoTarget, SpritePaths};
use oj_engine::{classify, parse_probe_output, recommend};
use oj_storage::WorkerRegistry;

use super::runtime;
use super::Context;
use crate::color;

#[derive(Args)]
pub struct WatchdogArgs {
    /// Only probe this sprite instead of every registered one
    #[arg(long)]
    sprite: Option<String>,
}

pub async fn run(args: WatchdogArgs, ctx: &Context) -> anyhow::Result<()> {
    let client = runtime::kube_client().await?;
    let remote = runtime::remote(client, ctx);
    let registry = WorkerRegistry::load(&ctx.registry)?;

    let names: Vec<String> = match &args.sprite {
        Some(name) => vec![name.clone()],
        None => registry.names().into_iter().map(str::to_string).collect(),
    };

    for name in names {
        let entry = match registry.lookup_name(&name) {
            Some(entry) => entry,
            None => {
                eprintln!("{}", color::context(&format!("skipping {name}: not in registry")));
                continue;
            }
        };

        let paths = SpritePaths::default_for(&name);
        let repo_dir = entry.assigned_repo.as_deref().and_then(|slug| slug.split_once('/')).map(|(owner, repo)| {
            let target = RepoTarget::from_slug(owner, repo);
            paths.join(&target.dir_name)
        });

        let script = oj_shell::build_probe_script(&paths.workspace, repo_dir.as_deref());
        let output = match remote.exec(&name, &script, std::time::Duration::from_secs(15)).await {
            Ok(output) => output,
            Err(e) => {
                println!("{}: {}", color::header(&name), color::context(&format!("probe failed: {e}")));
                continue;
            }
        };

        let probe = parse_probe_output(&output.combined_output);
        let state = classify(&probe);
        let action = recommend(state);

        println!(
            "{}: {} (recommend: {})",
            color::header(&name),
            color::literal(&state.to_string()),
            color::context(&action.action_type.to_string()),
        );
    }

    Ok(())
}
