// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A dispatch plan: the sequence of typed steps a `Run` would perform
//! (spec §3, §4.7 step 4). Pure function of the prepared request; emitted
//! to the operator in dry-run and embedded in the `Result` in execute mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a dispatch plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStep {
    RegistryLookup,
    ValidateIssue,
    Provision,
    ProbeConnectivity,
    ValidateEnv,
    ValidateWorkspace,
    CleanSignals,
    UploadScaffold,
    SetupRepo,
    UploadSkills,
    UploadPrompt,
    WriteStatus,
    EnsureProxy,
    StartAgent,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanStep::RegistryLookup => "registry_lookup",
            PlanStep::ValidateIssue => "validate_issue",
            PlanStep::Provision => "provision",
            PlanStep::ProbeConnectivity => "probe_connectivity",
            PlanStep::ValidateEnv => "validate_env",
            PlanStep::ValidateWorkspace => "validate_workspace",
            PlanStep::CleanSignals => "clean_signals",
            PlanStep::UploadScaffold => "upload_scaffold",
            PlanStep::SetupRepo => "setup_repo",
            PlanStep::UploadSkills => "upload_skills",
            PlanStep::UploadPrompt => "upload_prompt",
            PlanStep::WriteStatus => "write_status",
            PlanStep::EnsureProxy => "ensure_proxy",
            PlanStep::StartAgent => "start_agent",
        };
        f.write_str(s)
    }
}

/// A sequence of plan steps, pure data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: PlanStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
