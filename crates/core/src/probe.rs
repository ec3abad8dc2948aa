// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probe snapshots and watchdog classification output (spec §3, §4.9).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured result of one worker probe (parsed from the `__KEY__=value`
/// lines emitted by the probe script, spec §4.1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSnapshot {
    pub claude_process_count: u32,
    pub agent_running: bool,
    pub has_complete: bool,
    pub has_blocked: bool,
    pub blocked_reason: Option<String>,
    pub branch: Option<String>,
    pub commits_last_2h: u32,
    pub dirty_repos: u32,
    pub ahead_commits: u32,
    pub has_prompt: bool,
    pub current_task_id: Option<String>,
    pub status_file: Option<String>,
}

/// One lifecycle classification a worker can be in (spec §4.9, priority
/// order is load-bearing — see `oj_engine::watchdog::classify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatchdogState {
    Complete,
    Blocked,
    Dead,
    Idle,
    Stale,
    Active,
    Error,
}

impl fmt::Display for WatchdogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatchdogState::Complete => "complete",
            WatchdogState::Blocked => "blocked",
            WatchdogState::Dead => "dead",
            WatchdogState::Idle => "idle",
            WatchdogState::Stale => "stale",
            WatchdogState::Active => "active",
            WatchdogState::Error => "error",
        };
        f.write_str(s)
    }
}

impl WatchdogState {
    /// Whether this state increments the "needs attention" counter (spec §4.9).
    pub fn needs_attention(self) -> bool {
        !matches!(self, WatchdogState::Active | WatchdogState::Idle)
    }
}

/// The recommended remediation for a worker's classified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    None,
    Investigate,
    Redispatch,
    ManualDispatch,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::None => "none",
            ActionType::Investigate => "investigate",
            ActionType::Redispatch => "redispatch",
            ActionType::ManualDispatch => "manual_dispatch",
        };
        f.write_str(s)
    }
}

/// The outcome of attempting (or deciding not to attempt) a remediation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionType,
    pub executed: bool,
    pub success: bool,
    pub detail: Option<String>,
}

impl Default for ActionType {
    fn default() -> Self {
        ActionType::None
    }
}

impl Action {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn recommend(action_type: ActionType) -> Self {
        Self { action_type, executed: false, success: false, detail: None }
    }
}

/// One row in a watchdog run (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteReport {
    pub name: String,
    pub state: WatchdogState,
    pub task_label: Option<String>,
    pub elapsed_minutes: Option<u64>,
    pub probe: Option<ProbeSnapshot>,
    pub action: Action,
}
