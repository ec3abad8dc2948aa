// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj dispatch`: send a sprite a prompt or tracked issue to run.

use std::time::Duration;

use clap::{Args, ValueEnum};
use oj_adapters::{EventLogger, FileEventLogger, Provisioner, RemoteClient, TicketClient, UnavailableProvisioner, UnavailableRemoteClient};
use oj_core::{DispatchError, DispatchOutcome, DispatchRequest, IssueRef};
use oj_engine::Orchestrator;
use oj_validators::IssuePolicy;

use super::runtime;
use super::Context;
use crate::color;
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct DispatchArgs {
    /// Sprite name to dispatch
    sprite: String,

    /// Literal prompt text; mutually exclusive with --issue
    #[arg(long, conflicts_with = "issue")]
    prompt: Option<String>,

    /// Issue number to fetch and render as the prompt
    #[arg(long)]
    issue: Option<u64>,

    /// Repo slug the issue or task targets, e.g. acme/widgets
    #[arg(long)]
    repo: Option<String>,

    /// A local skill directory to mount into the sprite's workspace
    #[arg(long = "skill")]
    skills: Vec<std::path::PathBuf>,

    /// Run as a standing ralph loop instead of a one-shot
    #[arg(long)]
    ralph: bool,

    /// Actually run the dispatch against the sprite's pod; omit for a
    /// dry-run plan only (no Kubernetes or GitHub connection needed)
    #[arg(long)]
    execute: bool,

    /// Acknowledge a directly-supplied Anthropic API key
    #[arg(long)]
    allow_direct_api_key: bool,

    /// Allow a sprite not already known to the registry
    #[arg(long)]
    allow_orphan: bool,

    /// Token budget for the run
    #[arg(long, default_value_t = 200_000)]
    max_tokens: u64,

    /// Wall-clock budget for the run, in seconds
    #[arg(long, default_value_t = 1800)]
    max_time_secs: u64,

    /// How strictly issue-based dispatch is accepted
    #[arg(long, value_enum, default_value_t = CliIssuePolicy::Advisory)]
    issue_policy: CliIssuePolicy,

    /// Directory with CLAUDE.md, sprites/<name>.md personas,
    /// settings.json, and hooks/ to scaffold onto the sprite
    #[arg(long)]
    scaffold_dir: Option<std::path::PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliIssuePolicy {
    Off,
    Advisory,
    Strict,
}

impl From<CliIssuePolicy> for IssuePolicy {
    fn from(value: CliIssuePolicy) -> Self {
        match value {
            CliIssuePolicy::Off => IssuePolicy::Off,
            CliIssuePolicy::Advisory => IssuePolicy::Advisory,
            CliIssuePolicy::Strict => IssuePolicy::Strict,
        }
    }
}

pub async fn run(args: DispatchArgs, ctx: &Context) -> anyhow::Result<()> {
    let tickets = runtime::tickets()?;
    let event_log_path = ctx.registry.with_extension("events.jsonl");
    let logger = FileEventLogger::open(&event_log_path)
        .map_err(|e| anyhow::anyhow!("failed to open event log {}: {e}", event_log_path.display()))?;

    let sprite_name = args.sprite.clone();
    let request = DispatchRequest {
        sprite: args.sprite,
        prompt: args.prompt,
        repo: args.repo,
        skills: args.skills,
        issue: args.issue.map(|number| IssueRef { repo: None, number }),
        ralph: args.ralph,
        execute: args.execute,
        webhook_url: None,
        allow_direct_api_key: args.allow_direct_api_key,
        allow_orphan: args.allow_orphan,
        max_tokens: args.max_tokens,
        max_time: Duration::from_secs(args.max_time_secs),
    };

    let third_party_key = std::env::var("OPENROUTER_API_KEY").ok();
    let scaffold_dir = args.scaffold_dir.clone();

    // A dry run never touches the remote or the provisioner, so it
    // never needs a live Kubernetes connection — only execute mode pays
    // the cost of `kube::Client::try_default()`.
    let outcome = if args.execute {
        let client = runtime::kube_client().await?;
        let remote = runtime::remote(client.clone(), ctx);
        let provisioner = runtime::provisioner(client, ctx);
        let orchestrator = Orchestrator::new(remote, provisioner, tickets, logger, ctx.registry.clone())
            .with_issue_policy(args.issue_policy.into())
            .with_third_party_key(third_party_key)
            .with_scaffold_dir(scaffold_dir);
        dispatch_with(&orchestrator, request).await?
    } else {
        let orchestrator = Orchestrator::new(UnavailableRemoteClient, UnavailableProvisioner, tickets, logger, ctx.registry.clone())
            .with_issue_policy(args.issue_policy.into())
            .with_third_party_key(third_party_key)
            .with_scaffold_dir(scaffold_dir);
        dispatch_with(&orchestrator, request).await?
    };

    match outcome {
        DispatchOutcome::DryRun { plan } => {
            println!("{}", color::header(&format!("dry run: {} steps", plan.len())));
            for step in &plan.steps {
                println!("  {}", color::literal(&step.to_string()));
            }
        }
        DispatchOutcome::Executed { plan, final_state, pid, work_delta, provisioned, first_line_output, log_path } => {
            println!("{}", color::header(&format!("dispatched {}: {} steps", sprite_name, plan.len())));
            println!("  final state: {}", color::literal(&final_state.to_string()));
            println!("  provisioned: {}", color::literal(&provisioned.to_string()));
            if let Some(pid) = pid {
                println!("  agent pid: {}", color::literal(&pid.to_string()));
            }
            if let Some(line) = first_line_output {
                println!("  first line: {}", color::literal(&line));
            }
            println!("  log: {}", color::literal(&log_path));
            if let Some(delta) = work_delta {
                println!(
                    "  work: {} commit(s), {} dirty file(s), {} pr(s)",
                    delta.commits, delta.dirty_files, delta.prs
                );
            }
        }
    }

    Ok(())
}

async fn dispatch_with<R, P, T, L>(orchestrator: &Orchestrator<R, P, T, L>, request: DispatchRequest) -> anyhow::Result<DispatchOutcome>
where
    R: RemoteClient,
    P: Provisioner,
    T: TicketClient,
    L: EventLogger,
{
    let prepared = orchestrator.prepare(request).await.map_err(to_exit_error)?;
    let outcome = orchestrator.dispatch(prepared).await.map_err(to_exit_error)?;
    Ok(outcome)
}

fn to_exit_error(err: DispatchError) -> anyhow::Error {
    let code = match &err {
        DispatchError::InvalidRequest(_) | DispatchError::InvariantViolation { .. } => 2,
        DispatchError::DirectAnthropicKey { .. } | DispatchError::SecretInCommand => 3,
        DispatchError::SpriteUnreachable { .. } | DispatchError::Remote(_) => 4,
        _ => 1,
    };
    anyhow::Error::new(ExitError::new(code, err.to_string()))
}
