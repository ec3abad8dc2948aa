// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probe script builder (spec §4.8, C9).
//!
//! Emits a block of `__KEY__`-prefixed key=value lines the watchdog
//! parses into a [`oj_core::ProbeSnapshot`]. Free-form text values are
//! base64-encoded so embedded newlines or `=` signs never break the
//! line-oriented format.

use crate::quote::quote;
use crate::signals::{BLOCKED, BLOCKED_MD, TASK_COMPLETE, TASK_COMPLETE_MD};

pub fn build_probe_script(workspace: &str, repo_dir: Option<&str>) -> String {
    let mut script = String::new();
    script.push_str("set -uo pipefail\n");
    script.push_str(&format!("cd {}\n", quote(workspace)));

    script.push_str("b64() { printf '%s' \"$1\" | base64 | tr -d '\\n'; }\n");

    script.push_str(&format!(
        "claude_count=$(pgrep -fc claude 2>/dev/null || echo 0)\n"
    ));
    script.push_str("echo \"__KEY__CLAUDE_PROCESS_COUNT=$claude_count\"\n");

    script.push_str("agent_running=no\n");
    script.push_str("if [ -f agent.pid ]; then\n");
    script.push_str("  p=$(cat agent.pid 2>/dev/null || true)\n");
    script.push_str("  if [ -n \"$p\" ] && kill -0 \"$p\" 2>/dev/null; then agent_running=yes; fi\n");
    script.push_str("fi\n");
    script.push_str("echo \"__KEY__AGENT_RUNNING=$agent_running\"\n");

    script.push_str(&format!(
        "if [ -f {a} ] || [ -f {b} ]; then echo \"__KEY__HAS_COMPLETE=yes\"; else echo \"__KEY__HAS_COMPLETE=no\"; fi\n",
        a = quote(TASK_COMPLETE),
        b = quote(TASK_COMPLETE_MD),
    ));
    script.push_str(&format!(
        "if [ -f {a} ] || [ -f {b} ]; then echo \"__KEY__HAS_BLOCKED=yes\"; else echo \"__KEY__HAS_BLOCKED=no\"; fi\n",
        a = quote(BLOCKED_MD),
        b = quote(BLOCKED),
    ));

    script.push_str(&format!(
        "reason=$(cat {a} 2>/dev/null || cat {b} 2>/dev/null || true)\n",
        a = quote(BLOCKED_MD),
        b = quote(BLOCKED),
    ));
    script.push_str("echo \"__KEY__BLOCKED_REASON_B64=$(b64 \"$reason\")\"\n");

    script.push_str("has_prompt=no\n");
    script.push_str("[ -f PROMPT.md ] && has_prompt=yes\n");
    script.push_str("echo \"__KEY__HAS_PROMPT=$has_prompt\"\n");

    script.push_str("status_content=$(cat STATUS.json 2>/dev/null || true)\n");
    script.push_str("echo \"__KEY__STATUS_FILE_B64=$(b64 \"$status_content\")\"\n");

    script.push_str("task_id=$(cat CURRENT_TASK_ID 2>/dev/null || true)\n");
    script.push_str("echo \"__KEY__CURRENT_TASK_ID_B64=$(b64 \"$task_id\")\"\n");

    if let Some(dir) = repo_dir {
        script.push_str(&format!("if [ -d {} ]; then\n", quote(dir)));
        script.push_str(&format!("  cd {}\n", quote(dir)));
        script.push_str("  branch=$(git rev-parse --abbrev-ref HEAD 2>/dev/null || true)\n");
        script.push_str("  echo \"__KEY__BRANCH_B64=$(b64 \"$branch\")\"\n");
        script.push_str(
            "  commits_2h=$(git log --since='2 hours ago' --oneline 2>/dev/null | wc -l | tr -d ' ')\n",
        );
        script.push_str("  echo \"__KEY__COMMITS_LAST_2H=$commits_2h\"\n");
        script.push_str("  dirty=0\n");
        script.push_str("  [ -n \"$(git status --porcelain 2>/dev/null)\" ] && dirty=1\n");
        script.push_str("  echo \"__KEY__DIRTY_REPOS=$dirty\"\n");
        script.push_str(
            "  ahead=$(git rev-list --count @{upstream}..HEAD 2>/dev/null || echo 0)\n",
        );
        script.push_str("  echo \"__KEY__AHEAD_COMMITS=$ahead\"\n");
        script.push_str("else\n");
        script.push_str("  echo \"__KEY__BRANCH_B64=\"\n");
        script.push_str("  echo \"__KEY__COMMITS_LAST_2H=0\"\n");
        script.push_str("  echo \"__KEY__DIRTY_REPOS=0\"\n");
        script.push_str("  echo \"__KEY__AHEAD_COMMITS=0\"\n");
        script.push_str("fi\n");
    } else {
        script.push_str("echo \"__KEY__BRANCH_B64=\"\n");
        script.push_str("echo \"__KEY__COMMITS_LAST_2H=0\"\n");
        script.push_str("echo \"__KEY__DIRTY_REPOS=0\"\n");
        script.push_str("echo \"__KEY__AHEAD_COMMITS=0\"\n");
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_all_documented_keys() {
        let script = build_probe_script("/ws", Some("/ws/widgets"));
        for key in [
            "__KEY__CLAUDE_PROCESS_COUNT",
            "__KEY__AGENT_RUNNING",
            "__KEY__HAS_COMPLETE",
            "__KEY__HAS_BLOCKED",
            "__KEY__BLOCKED_REASON_B64",
            "__KEY__BRANCH_B64",
            "__KEY__COMMITS_LAST_2H",
            "__KEY__DIRTY_REPOS",
            "__KEY__AHEAD_COMMITS",
            "__KEY__HAS_PROMPT",
            "__KEY__STATUS_FILE_B64",
            "__KEY__CURRENT_TASK_ID_B64",
        ] {
            assert!(script.contains(key), "missing {key}");
        }
    }

    #[test]
    fn without_repo_dir_git_keys_default_to_empty() {
        let script = build_probe_script("/ws", None);
        assert!(script.contains("__KEY__BRANCH_B64=\"\n") || script.contains("echo \"__KEY__BRANCH_B64=\"\n"));
    }
}
