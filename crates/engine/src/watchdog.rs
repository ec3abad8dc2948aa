// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The watchdog (spec §4.9, C9): parses a worker's probe output,
//! classifies its lifecycle state, and recommends (optionally
//! executes) a remediation.
//!
//! Classification priority is load-bearing: a sprite showing both a
//! completion signal and a blocked signal is `Complete`, never
//! `Blocked` — completion always wins once it's visible. Checks run in
//! the fixed order below and the first match decides the state.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use oj_core::{Action, ActionType, ProbeSnapshot, WatchdogState};
use std::collections::HashMap;

/// Parse the `__KEY__=value` lines a probe script emits into a
/// [`ProbeSnapshot`]. Unrecognized keys are ignored so a newer probe
/// script can add fields without breaking an older watchdog binary.
pub fn parse_probe_output(output: &str) -> ProbeSnapshot {
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for line in output.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("__KEY__") else { continue };
        if let Some((key, value)) = rest.split_once('=') {
            fields.insert(key, value);
        }
    }

    let get_u32 = |key: &str| fields.get(key).and_then(|v| v.parse().ok()).unwrap_or(0);
    let get_yes_no = |key: &str| fields.get(key).map(|v| *v == "yes").unwrap_or(false);
    let get_b64 = |key: &str| {
        fields.get(key).and_then(|v| {
            if v.is_empty() {
                return None;
            }
            BASE64.decode(v).ok().and_then(|bytes| String::from_utf8(bytes).ok()).filter(|s| !s.is_empty())
        })
    };

    ProbeSnapshot {
        claude_process_count: get_u32("CLAUDE_PROCESS_COUNT"),
        agent_running: get_yes_no("AGENT_RUNNING"),
        has_complete: get_yes_no("HAS_COMPLETE"),
        has_blocked: get_yes_no("HAS_BLOCKED"),
        blocked_reason: get_b64("BLOCKED_REASON_B64"),
        branch: get_b64("BRANCH_B64"),
        commits_last_2h: get_u32("COMMITS_LAST_2H"),
        dirty_repos: get_u32("DIRTY_REPOS"),
        ahead_commits: get_u32("AHEAD_COMMITS"),
        has_prompt: get_yes_no("HAS_PROMPT"),
        current_task_id: get_b64("CURRENT_TASK_ID_B64"),
        status_file: get_b64("STATUS_FILE_B64"),
    }
}

/// Classify a probe snapshot, highest-priority check first.
pub fn classify(probe: &ProbeSnapshot) -> WatchdogState {
    if probe.has_complete {
        return WatchdogState::Complete;
    }
    if probe.has_blocked {
        return WatchdogState::Blocked;
    }
    if !probe.agent_running && probe.claude_process_count == 0 {
        return WatchdogState::Dead;
    }
    if !probe.agent_running && probe.has_prompt {
        return WatchdogState::Idle;
    }
    if probe.agent_running && probe.commits_last_2h == 0 && probe.dirty_repos == 0 {
        return WatchdogState::Stale;
    }
    if probe.agent_running {
        return WatchdogState::Active;
    }
    WatchdogState::Error
}

/// Recommend (without executing) the remediation for a classified state.
pub fn recommend(state: WatchdogState) -> Action {
    match state {
        WatchdogState::Complete | WatchdogState::Active => Action::none(),
        WatchdogState::Blocked => Action::recommend(ActionType::Investigate),
        WatchdogState::Dead | WatchdogState::Idle => Action::recommend(ActionType::Redispatch),
        WatchdogState::Stale => Action::recommend(ActionType::Investigate),
        WatchdogState::Error => Action::recommend(ActionType::ManualDispatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_lines(pairs: &[(&str, &str)]) -> String {
        pairs.iter().map(|(k, v)| format!("__KEY__{k}={v}\n")).collect()
    }

    #[test]
    fn parses_counts_and_yes_no_flags() {
        let output = snapshot_lines(&[
            ("CLAUDE_PROCESS_COUNT", "2"),
            ("AGENT_RUNNING", "yes"),
            ("HAS_COMPLETE", "no"),
            ("HAS_BLOCKED", "no"),
        ]);
        let probe = parse_probe_output(&output);
        assert_eq!(probe.claude_process_count, 2);
        assert!(probe.agent_running);
        assert!(!probe.has_complete);
    }

    #[test]
    fn decodes_base64_fields() {
        let encoded = BASE64.encode("blocked on missing credentials");
        let output = snapshot_lines(&[("BLOCKED_REASON_B64", &encoded)]);
        let probe = parse_probe_output(&output);
        assert_eq!(probe.blocked_reason.as_deref(), Some("blocked on missing credentials"));
    }

    #[test]
    fn empty_base64_field_decodes_to_none() {
        let output = snapshot_lines(&[("STATUS_FILE_B64", "")]);
        let probe = parse_probe_output(&output);
        assert_eq!(probe.status_file, None);
    }

    #[test]
    fn complete_outranks_blocked() {
        let mut probe = ProbeSnapshot::default();
        probe.has_complete = true;
        probe.has_blocked = true;
        assert_eq!(classify(&probe), WatchdogState::Complete);
    }

    #[test]
    fn no_process_and_not_running_is_dead() {
        let probe = ProbeSnapshot::default();
        assert_eq!(classify(&probe), WatchdogState::Dead);
    }

    #[test]
    fn prompt_present_but_not_running_is_idle() {
        let mut probe = ProbeSnapshot::default();
        probe.has_prompt = true;
        probe.claude_process_count = 1;
        assert_eq!(classify(&probe), WatchdogState::Idle);
    }

    #[test]
    fn running_with_no_recent_activity_is_stale() {
        let mut probe = ProbeSnapshot::default();
        probe.agent_running = true;
        probe.claude_process_count = 1;
        assert_eq!(classify(&probe), WatchdogState::Stale);
    }

    #[test]
    fn running_with_recent_commits_is_active() {
        let mut probe = ProbeSnapshot::default();
        probe.agent_running = true;
        probe.claude_process_count = 1;
        probe.commits_last_2h = 3;
        assert_eq!(classify(&probe), WatchdogState::Active);
    }

    #[test]
    fn dead_and_idle_recommend_redispatch() {
        assert_eq!(recommend(WatchdogState::Dead).action_type, ActionType::Redispatch);
        assert_eq!(recommend(WatchdogState::Idle).action_type, ActionType::Redispatch);
    }

    #[test]
    fn blocked_recommends_investigation() {
        assert_eq!(recommend(WatchdogState::Blocked).action_type, ActionType::Investigate);
    }
}
