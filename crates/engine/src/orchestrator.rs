// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch orchestrator (spec §4.7, C7): turns a `DispatchRequest`
//! into a `PreparedRequest`, a `Plan`, and — in execute mode — an
//! actual run against a sprite, driving the C6 state machine and
//! emitting a `DispatchEvent` at every transition.
//!
//! Generic over the four external boundaries so tests can swap in
//! `oj_adapters::test_support` fakes without touching this module.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use oj_adapters::{EventLogger, Provisioner, RemoteClient, TicketClient};
use oj_core::{
    DispatchError, DispatchEvent, DispatchMode, DispatchOutcome, DispatchRequest, DispatchState, Plan, PlanStep,
    PreparedRequest, ProvisioningMeta, RepoTarget, SpritePaths, StateEvent, StatusFile,
};
use oj_shell::builder::{self, LoopParams, OneshotParams};
use oj_skills::render_skill_block;
use oj_storage::lock::with_locked_worker_registry;
use oj_validators::{direct_key, issue_policy, oneshot, secrets, shape, IssuePolicy};

use crate::proxy::ProxyHandle;
use crate::state_machine::advance;
use crate::{proxy, work_delta};

const EXEC_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Orchestrator<R, P, T, L> {
    remote: R,
    provisioner: P,
    tickets: T,
    logger: L,
    registry_path: PathBuf,
    issue_policy: IssuePolicy,
    /// API key for a third-party proxy backend. `ensure_proxy` only
    /// runs when this is set — a deployment with no third-party key
    /// configured talks to the provider directly.
    third_party_key: Option<String>,
    /// Local directory holding `CLAUDE.md`, `sprites/<name>.md`
    /// personas, `settings.json`, and `hooks/*` to upload onto a
    /// freshly-prepared sprite (spec §4.7 step 9). `None` skips the
    /// scaffold step entirely.
    scaffold_dir: Option<PathBuf>,
}

impl<R, P, T, L> Orchestrator<R, P, T, L>
where
    R: RemoteClient,
    P: Provisioner,
    T: TicketClient,
    L: EventLogger,
{
    pub fn new(remote: R, provisioner: P, tickets: T, logger: L, registry_path: PathBuf) -> Self {
        Self {
            remote,
            provisioner,
            tickets,
            logger,
            registry_path,
            issue_policy: IssuePolicy::default(),
            third_party_key: None,
            scaffold_dir: None,
        }
    }

    pub fn with_issue_policy(mut self, policy: IssuePolicy) -> Self {
        self.issue_policy = policy;
        self
    }

    pub fn with_third_party_key(mut self, key: Option<String>) -> Self {
        self.third_party_key = key;
        self
    }

    pub fn with_scaffold_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scaffold_dir = dir;
        self
    }

    /// Validate, resolve, and render a request into something the
    /// pipeline can run. Never touches the network; does touch local
    /// disk to resolve skill mounts.
    pub async fn prepare(&self, request: DispatchRequest) -> Result<PreparedRequest, DispatchError> {
        shape::validate_sprite_name(&request.sprite).map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;
        if let Some(repo) = &request.repo {
            shape::validate_repo_slug(repo).map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;
        }
        issue_policy::validate_issue_policy(&request, self.issue_policy)
            .map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;

        let repo = request.repo.as_ref().map(|slug| {
            let (owner, name) = slug.split_once('/').unwrap_or(("", slug.as_str()));
            RepoTarget::from_slug(owner, name)
        });

        let paths = SpritePaths::default_for(&request.sprite);

        let prompt = match (&request.prompt, &request.issue) {
            (Some(prompt), _) => prompt.clone(),
            (None, Some(issue)) => {
                let details = self
                    .tickets
                    .fetch_issue(issue)
                    .await
                    .map_err(|e| DispatchError::Remote(e.to_string()).at_step("validate_issue"))?;
                format!("{}\n\n{}", details.title, details.body)
            }
            (None, None) => return Err(DispatchError::InvalidRequest("request has neither prompt nor issue".to_string())),
        };

        if secrets::contains_secret(&prompt) {
            return Err(DispatchError::SecretInCommand);
        }

        let skills = oj_skills::resolve_mounts(&request.skills, &paths.workspace)
            .map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;

        let skill_block = render_skill_block(&skills);
        let prompt = if skill_block.is_empty() { prompt } else { format!("{prompt}\n\n{skill_block}") };

        let task_label = oj_core::ellipsize(&prompt, 220);

        // Build the real start command here — §4.7 step 16's credential
        // scan and the oneshot invariant check below both need the
        // command the worker will actually run, not a placeholder.
        let prompt_path = paths.join("PROMPT.md");
        let log_path = paths.join(if request.ralph { "ralph.log" } else { "dispatch.log" });
        let start_command = if request.ralph {
            builder::build_loop_script(&LoopParams {
                workspace: &paths.workspace,
                sprite_name: &request.sprite,
                prompt_path: &prompt_path,
                log_path: &log_path,
                max_iterations: 100,
                max_tokens: request.max_tokens,
                max_time_sec: request.max_time.as_secs(),
            })
        } else {
            builder::build_oneshot_script(&OneshotParams {
                workspace: &paths.workspace,
                prompt_path: &prompt_path,
                log_path: &log_path,
                proxy_ensure_script: None,
                proxy_env: &[],
            })
        };

        if !request.ralph {
            oneshot::validate_oneshot_invariant(&start_command)
                .map_err(|missing| DispatchError::InvariantViolation { missing })?;
        }

        Ok(PreparedRequest {
            request,
            repo,
            skills,
            prompt,
            start_command,
            task_label,
            paths,
            provisioning: ProvisioningMeta::default(),
        })
    }

    /// The sequence of steps this request would perform. Pure and
    /// side-effect free, so it doubles as the dry-run output.
    pub fn plan(&self, prepared: &PreparedRequest) -> Plan {
        let mut plan = Plan::new();
        plan.push(PlanStep::RegistryLookup);
        if prepared.request.issue.is_some() {
            plan.push(PlanStep::ValidateIssue);
        }
        plan.push(PlanStep::Provision);
        plan.push(PlanStep::ProbeConnectivity);
        if !prepared.request.allow_direct_api_key {
            plan.push(PlanStep::ValidateEnv);
        }
        plan.push(PlanStep::ValidateWorkspace);
        plan.push(PlanStep::CleanSignals);
        if self.scaffold_dir.is_some() {
            plan.push(PlanStep::UploadScaffold);
        }
        if prepared.repo.is_some() {
            plan.push(PlanStep::SetupRepo);
        }
        if !prepared.skills.is_empty() {
            plan.push(PlanStep::UploadSkills);
        }
        plan.push(PlanStep::UploadPrompt);
        plan.push(PlanStep::WriteStatus);
        if self.third_party_key.is_some() {
            plan.push(PlanStep::EnsureProxy);
        }
        plan.push(PlanStep::StartAgent);
        plan
    }

    /// Run the plan for real against `prepared`.
    pub async fn dispatch(&self, prepared: PreparedRequest) -> Result<DispatchOutcome, DispatchError> {
        let plan = self.plan(&prepared);
        if !prepared.request.execute {
            return Ok(DispatchOutcome::DryRun { plan });
        }

        let sprite = prepared.request.sprite.clone();
        self.emit(DispatchEvent::DispatchStarted { sprite: sprite.clone(), execute: true }).await;

        let mut state = DispatchState::Pending;
        let cancelled = || false;

        // Step 2: decide whether this sprite needs provisioning — known
        // to the registry, or already live in the remote fleet.
        let in_registry = with_locked_worker_registry(&self.registry_path, cancelled, |reg| {
            Ok(reg.lookup_name(&sprite).is_some())
        })
        .map_err(|e| DispatchError::Remote(e.to_string()).at_step("registry_lookup"));
        let in_registry = match in_registry {
            Ok(known) => known,
            Err(e) => return self.fail(&sprite, state, e).await,
        };

        let in_fleet = if in_registry {
            false
        } else {
            match self.remote.list_fleet().await {
                Ok(fleet) => fleet.iter().any(|name| name == &sprite),
                Err(e) => return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("list_fleet")).await,
            }
        };
        let machine_known = in_registry || in_fleet;
        let provisioned = !machine_known;

        // Step 3: orphan check against the loaded fleet composition, if any.
        let known_sprites = &prepared.provisioning.known_sprites;
        if !known_sprites.is_empty() && !known_sprites.iter().any(|n| n == &sprite) && !prepared.request.allow_orphan {
            return self
                .fail(&sprite, state, DispatchError::OrphanSprite { sprite: sprite.clone(), valid: known_sprites.clone() }.at_step("orphan_check"))
                .await;
        }

        state = self.transition(&sprite, state, if machine_known { StateEvent::Ready } else { StateEvent::Provision }).await?;

        if !machine_known {
            let machine_id = match self.provisioner.provision(&sprite).await {
                Ok(machine_id) => machine_id,
                Err(e) => return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("provision")).await,
            };
            let registered = with_locked_worker_registry(&self.registry_path, cancelled, |reg| reg.register(&sprite, machine_id.as_str()))
                .map_err(|e| DispatchError::Remote(e.to_string()).at_step("provision"));
            if let Err(e) = registered {
                tracing::warn!(error = %e, sprite = %sprite, "failed to record sprite in registry after provisioning");
            }
            state = self.transition(&sprite, state, StateEvent::Provisioned).await?;
        }

        if let Err(e) = self.remote.probe_connectivity(&sprite).await {
            return self
                .fail(&sprite, state, DispatchError::SpriteUnreachable { sprite: sprite.clone(), reason: e.to_string() }.at_step("probe_connectivity"))
                .await;
        }

        // Step 7: refuse a live Anthropic key in the worker's own
        // environment unless the request explicitly allows it.
        if !prepared.request.allow_direct_api_key {
            let observed = match self.remote.exec(&sprite, "printenv ANTHROPIC_API_KEY", EXEC_TIMEOUT).await {
                Ok(output) => output.combined_output.trim().to_string(),
                Err(_) => String::new(),
            };
            if let Err(e) = direct_key::refuse_direct_key(&observed, prepared.request.allow_direct_api_key) {
                let key_prefix = match e {
                    oj_validators::ValidationError::DirectApiKeyRefused { key_prefix } => key_prefix,
                    other => return self.fail(&sprite, state, DispatchError::InvalidRequest(other.to_string()).at_step("validate_env")).await,
                };
                return self.fail(&sprite, state, DispatchError::DirectAnthropicKey { key_prefix }.at_step("validate_env")).await;
            }
        }

        if let Err(e) = self.remote.exec(&sprite, &oj_shell::signals::clean_only_signals_script(&prepared.paths.workspace), EXEC_TIMEOUT).await {
            return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("clean_signals")).await;
        }

        if let Some(scaffold_dir) = self.scaffold_dir.clone() {
            if let Err(e) = self.upload_scaffold(&sprite, &scaffold_dir, &prepared).await {
                return self.fail(&sprite, state, e.at_step("upload_scaffold")).await;
            }
        }

        if let Some(repo) = &prepared.repo {
            let script = builder::build_repo_setup_script(&prepared.paths.workspace, &repo.clone_url, &repo.dir_name);
            if let Err(e) = self.remote.exec(&sprite, &script, EXEC_TIMEOUT).await {
                return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("setup_repo")).await;
            }
        }

        for mount in &prepared.skills {
            for file in &mount.files {
                let contents = match std::fs::read(&file.local_path) {
                    Ok(c) => c,
                    Err(e) => return self.fail(&sprite, state, DispatchError::Io(e).at_step("upload_skills")).await,
                };
                let remote_path = format!("{}/{}", mount.remote_root, file.remote_rel_path);
                if let Err(e) = self.remote.upload(&sprite, &remote_path, &contents).await {
                    return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("upload_skills")).await;
                }
            }
        }

        let prompt_path = prepared.paths.join("PROMPT.md");
        if let Err(e) = self.remote.upload(&sprite, &prompt_path, prepared.prompt.as_bytes()).await {
            return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("upload_prompt")).await;
        }
        state = self.transition(&sprite, state, StateEvent::UploadPrompt).await?;

        let mode = if prepared.request.ralph { DispatchMode::Ralph } else { DispatchMode::Oneshot };
        let status = StatusFile::started(prepared.repo.as_ref().map(|r| r.slug.clone()), mode, prepared.task_label.clone(), Utc::now());
        let status_path = prepared.paths.join("STATUS.json");
        let status_json = match serde_json::to_string_pretty(&status) {
            Ok(json) => json,
            Err(e) => return self.fail(&sprite, state, DispatchError::InvalidRequest(e.to_string()).at_step("write_status")).await,
        };
        if let Err(e) = self.remote.upload(&sprite, &status_path, status_json.as_bytes()).await {
            return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("write_status")).await;
        }

        let proxy_handle = match &self.third_party_key {
            Some(token) => match proxy::ensure_proxy(&self.remote, &sprite, token).await {
                Ok(handle) => handle,
                Err(e) => return self.fail(&sprite, state, e.at_step("ensure_proxy")).await,
            },
            None => ProxyHandle { base_url: String::new(), env: Vec::new() },
        };

        let pre_head = if let Some(repo) = &prepared.repo {
            work_delta::capture_pre_exec_head(&self.remote, &sprite, &prepared.paths.join(&repo.dir_name)).await
        } else {
            None
        };

        let log_path = prepared.paths.join(if prepared.request.ralph { "ralph.log" } else { "dispatch.log" });
        let script = if prepared.request.ralph {
            builder::build_loop_script(&LoopParams {
                workspace: &prepared.paths.workspace,
                sprite_name: &sprite,
                prompt_path: &prompt_path,
                log_path: &log_path,
                max_iterations: 100,
                max_tokens: prepared.request.max_tokens,
                max_time_sec: prepared.request.max_time.as_secs(),
            })
        } else {
            builder::build_oneshot_script(&OneshotParams {
                workspace: &prepared.paths.workspace,
                prompt_path: &prompt_path,
                log_path: &log_path,
                proxy_ensure_script: None,
                proxy_env: &proxy_handle.env,
            })
        };

        // Step 16: scan the final, fully-assembled command — not just
        // the raw prompt — for a credential that slipped through.
        if secrets::contains_secret(&script) {
            return self.fail(&sprite, state, DispatchError::SecretInCommand.at_step("validate_command")).await;
        }

        let exec_result = self.remote.exec(&sprite, &script, prepared.request.max_time).await;
        let output = match exec_result {
            Ok(output) => output,
            Err(e) => return self.fail(&sprite, state, DispatchError::Remote(e.to_string()).at_step("start_agent")).await,
        };
        let pid = oj_adapters::ExecOutput::parse_pid(&output.combined_output);
        let first_line_output = output.combined_output.lines().next().map(str::to_string);
        self.emit(DispatchEvent::AgentStarted { sprite: sprite.clone(), pid: pid.map(|p| p as u32) }).await;
        state = self.transition(&sprite, state, StateEvent::StartAgent).await?;

        if prepared.request.ralph {
            self.emit(DispatchEvent::Done { sprite: sprite.clone(), state }).await;
            return Ok(DispatchOutcome::Executed { plan, final_state: state, pid, work_delta: None, provisioned, first_line_output, log_path });
        }

        let delta = if let Some(repo) = &prepared.repo {
            Some(work_delta::compute_work_delta(&self.remote, &sprite, &prepared.paths.join(&repo.dir_name), pre_head.as_deref()).await)
        } else {
            None
        };
        state = self.transition(&sprite, state, StateEvent::Complete).await?;

        if let Ok(completion_json) = status.completed_json(Utc::now(), output.exit_code) {
            if let Err(e) = self.remote.upload(&sprite, &status_path, completion_json.as_bytes()).await {
                tracing::warn!(error = %e, sprite = %sprite, "failed to upload completion status");
            }
        }

        self.emit(DispatchEvent::Done { sprite: sprite.clone(), state }).await;

        Ok(DispatchOutcome::Executed { plan, final_state: state, pid, work_delta: delta, provisioned, first_line_output, log_path })
    }

    /// Upload the scaffold: `CLAUDE.md`, this sprite's persona, a
    /// shared `settings.json`, every non-hidden hook script, and a
    /// derived `flags.sh` (spec §4.7 step 9). A file missing from
    /// `scaffold_dir` is skipped rather than treated as an error.
    async fn upload_scaffold(&self, sprite: &str, scaffold_dir: &std::path::Path, prepared: &PreparedRequest) -> Result<(), DispatchError> {
        let uploads = [
            (scaffold_dir.join("CLAUDE.md"), "CLAUDE.md".to_string()),
            (scaffold_dir.join("sprites").join(format!("{sprite}.md")), "PERSONA.md".to_string()),
            (scaffold_dir.join("settings.json"), "settings.json".to_string()),
        ];
        for (local_path, remote_rel) in uploads {
            if let Ok(contents) = std::fs::read(&local_path) {
                let remote_path = prepared.paths.join(&remote_rel);
                self.remote.upload(sprite, &remote_path, &contents).await.map_err(|e| DispatchError::Remote(e.to_string()))?;
            }
        }

        let hooks_dir = scaffold_dir.join("hooks");
        if let Ok(entries) = std::fs::read_dir(&hooks_dir) {
            for entry in entries.flatten() {
                let name = entry.file_name();
                let Some(name) = name.to_str() else { continue };
                if name.starts_with('.') {
                    continue;
                }
                let Ok(contents) = std::fs::read(entry.path()) else { continue };
                let remote_path = prepared.paths.join(&format!("hooks/{name}"));
                self.remote.upload(sprite, &remote_path, &contents).await.map_err(|e| DispatchError::Remote(e.to_string()))?;
            }
        }

        let flags_path = prepared.paths.join("flags.sh");
        self.remote
            .upload(sprite, &flags_path, oj_shell::flags::flags_sh().as_bytes())
            .await
            .map_err(|e| DispatchError::Remote(e.to_string()))?;
        Ok(())
    }

    async fn transition(&self, sprite: &str, from: DispatchState, event: StateEvent) -> Result<DispatchState, DispatchError> {
        let to = advance(from, event)?;
        self.emit(DispatchEvent::StateTransition { sprite: sprite.to_string(), from, to }).await;
        Ok(to)
    }

    async fn fail(&self, sprite: &str, state: DispatchState, err: DispatchError) -> Result<DispatchOutcome, DispatchError> {
        let failed = advance(state, StateEvent::Failure).unwrap_or(DispatchState::Failed);
        self.emit(DispatchEvent::Error { sprite: sprite.to_string(), step: err.step_code().map(str::to_string), message: err.to_string() })
            .await;
        self.emit(DispatchEvent::Done { sprite: sprite.to_string(), state: failed }).await;
        Err(err)
    }

    async fn emit(&self, event: DispatchEvent) {
        if let Err(e) = self.logger.log(&event).await {
            tracing::warn!(error = %e, "failed to log dispatch event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oj_adapters::test_support::{FakeProvisioner, FakeRemoteClient, FakeTicketClient, RecordingEventLogger};
    use oj_adapters::ExecOutput;
    use oj_core::DispatchRequest;

    fn fake_exec_ok() -> ExecOutput {
        ExecOutput { combined_output: "PID: 123\n".to_string(), exit_code: Some(0), pid: Some(123) }
    }

    fn orchestrator_with(
        remote: FakeRemoteClient,
        registry_path: PathBuf,
    ) -> Orchestrator<FakeRemoteClient, FakeProvisioner, FakeTicketClient, RecordingEventLogger> {
        Orchestrator::new(remote, FakeProvisioner::default(), FakeTicketClient::default(), RecordingEventLogger::default(), registry_path)
    }

    #[tokio::test]
    async fn dry_run_returns_plan_without_touching_remote() {
        let orchestrator = orchestrator_with(FakeRemoteClient::new(), PathBuf::from("/tmp/registry.toml"));

        let request = DispatchRequest::new("sprite-1", "do the thing");
        let prepared = orchestrator.prepare(request).await.unwrap();
        let outcome = orchestrator.dispatch(prepared).await.unwrap();

        match outcome {
            DispatchOutcome::DryRun { plan } => assert!(plan.steps.contains(&PlanStep::StartAgent)),
            _ => panic!("expected dry run"),
        }
    }

    #[tokio::test]
    async fn oneshot_execute_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("registry.toml");

        let remote = FakeRemoteClient::new().with_exec_response("sprite-1", fake_exec_ok());
        let orchestrator = orchestrator_with(remote, registry_path);

        let mut request = DispatchRequest::new("sprite-1", "do the thing");
        request.execute = true;
        let prepared = orchestrator.prepare(request).await.unwrap();
        let outcome = orchestrator.dispatch(prepared).await.unwrap();

        match outcome {
            DispatchOutcome::Executed { final_state, pid, provisioned, first_line_output, log_path, .. } => {
                assert_eq!(final_state, DispatchState::Completed);
                assert_eq!(pid, Some(123));
                assert!(provisioned);
                assert_eq!(first_line_output.as_deref(), Some("PID: 123"));
                assert!(log_path.ends_with("dispatch.log"));
            }
            _ => panic!("expected executed outcome"),
        }
    }

    #[tokio::test]
    async fn secret_in_prompt_is_refused_before_dispatch() {
        let orchestrator = orchestrator_with(FakeRemoteClient::new(), PathBuf::from("/tmp/registry.toml"));

        let request = DispatchRequest::new("sprite-1", "here is my key sk-ant-api03abc123");
        let err = orchestrator.prepare(request).await.unwrap_err();
        assert!(matches!(err, DispatchError::SecretInCommand));
    }

    #[tokio::test]
    async fn direct_key_present_on_worker_is_refused_during_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("registry.toml");

        let remote = FakeRemoteClient::new().with_exec_response(
            "sprite-1",
            ExecOutput { combined_output: "sk-ant-api03xyz123\n".to_string(), exit_code: Some(0), pid: None },
        );
        let orchestrator = orchestrator_with(remote, registry_path);

        let mut request = DispatchRequest::new("sprite-1", "do the thing");
        request.execute = true;
        let prepared = orchestrator.prepare(request).await.unwrap();
        let err = orchestrator.dispatch(prepared).await.unwrap_err();
        assert!(matches!(err, DispatchError::Step { source, .. } if matches!(*source, DispatchError::DirectAnthropicKey { .. })));
    }

    #[tokio::test]
    async fn already_live_sprite_is_recognized_via_fleet_listing() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("registry.toml");

        let remote = FakeRemoteClient::new().with_fleet(["sprite-1"]).with_exec_response("sprite-1", fake_exec_ok());
        let orchestrator = orchestrator_with(remote, registry_path);

        let mut request = DispatchRequest::new("sprite-1", "do the thing");
        request.execute = true;
        let prepared = orchestrator.prepare(request).await.unwrap();
        let outcome = orchestrator.dispatch(prepared).await.unwrap();

        match outcome {
            DispatchOutcome::Executed { provisioned, .. } => assert!(!provisioned),
            _ => panic!("expected executed outcome"),
        }
    }

    #[tokio::test]
    async fn orphan_sprite_outside_the_loaded_composition_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let registry_path = dir.path().join("registry.toml");

        let remote = FakeRemoteClient::new().with_exec_response("sprite-1", fake_exec_ok());
        let orchestrator = orchestrator_with(remote, registry_path);

        let mut request = DispatchRequest::new("sprite-1", "do the thing");
        request.execute = true;
        let mut prepared = orchestrator.prepare(request).await.unwrap();
        prepared.provisioning.known_sprites = vec!["sprite-2".to_string(), "sprite-3".to_string()];

        let err = orchestrator.dispatch(prepared).await.unwrap_err();
        assert!(matches!(err, DispatchError::Step { source, .. } if matches!(*source, DispatchError::OrphanSprite { .. })));
    }
}
