// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch state (spec §3, §4.6). The transition table itself (`advance`)
//! lives in `oj-engine::state_machine`; this module only defines the states
//! and events as data so every crate can share one vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One state in the dispatch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchState {
    Pending,
    Provisioning,
    Ready,
    PromptUploaded,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchState::Pending => "pending",
            DispatchState::Provisioning => "provisioning",
            DispatchState::Ready => "ready",
            DispatchState::PromptUploaded => "prompt_uploaded",
            DispatchState::Running => "running",
            DispatchState::Completed => "completed",
            DispatchState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// An event that drives a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateEvent {
    Provision,
    Provisioned,
    Ready,
    UploadPrompt,
    StartAgent,
    Complete,
    Failure,
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateEvent::Provision => "provision",
            StateEvent::Provisioned => "provisioned",
            StateEvent::Ready => "ready",
            StateEvent::UploadPrompt => "upload_prompt",
            StateEvent::StartAgent => "start_agent",
            StateEvent::Complete => "complete",
            StateEvent::Failure => "failure",
        };
        f.write_str(s)
    }
}
