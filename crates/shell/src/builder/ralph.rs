// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loop ("Ralph") script builder (spec §4.1, C1).
//!
//! Removes stale signals and prior PID files, kills any previously
//! recorded agent process, locates the agent binary and statically
//! validates it accepts the Required Agent Flags (text-scanned for
//! interpreted-script binaries; relied on the agent's own runtime check
//! for compiled ones), launches the agent in the background with its
//! iteration/token/time caps and the required-flags string in its
//! environment, and records the new PID to both `agent.pid` and
//! `ralph.pid`.

use crate::flags::as_str as required_flags;
use crate::quote::quote;
use crate::signals::clean_script;

pub struct LoopParams<'a> {
    pub workspace: &'a str,
    pub sprite_name: &'a str,
    pub prompt_path: &'a str,
    pub log_path: &'a str,
    pub max_iterations: u32,
    pub max_tokens: u64,
    pub max_time_sec: u64,
}

pub fn build_loop_script(params: &LoopParams<'_>) -> String {
    let mut script = String::new();
    script.push_str("set -euo pipefail\n");
    script.push_str(&format!("mkdir -p {}\n", quote(params.workspace)));
    script.push_str(&format!("cd {}\n", quote(params.workspace)));
    script.push_str(&clean_script(params.workspace));
    script.push('\n');
    script.push_str("oldpid=$(cat agent.pid 2>/dev/null || true)\n");
    script.push_str("rm -f agent.pid ralph.pid\n");
    script.push_str("if [ -n \"$oldpid\" ] && kill -0 \"$oldpid\" 2>/dev/null; then\n");
    script.push_str("  kill \"$oldpid\" 2>/dev/null || true\n");
    script.push_str("fi\n");

    script.push_str("AGENT_BIN=$(command -v claude || true)\n");
    script.push_str("if [ -z \"$AGENT_BIN\" ]; then\n");
    script.push_str("  echo \"claude binary not found\" >&2\n");
    script.push_str("  exit 1\n");
    script.push_str("fi\n");
    script.push_str("if head -c 2 \"$AGENT_BIN\" 2>/dev/null | grep -q '#!'; then\n");
    script.push_str(&format!(
        "  if ! grep -q -- {flag1} \"$AGENT_BIN\" || ! grep -q -- {flag2} \"$AGENT_BIN\"; then\n",
        flag1 = quote("--dangerously-skip-permissions"),
        flag2 = quote("--output-format"),
    ));
    script.push_str("    echo \"agent binary missing required flags\" >&2\n");
    script.push_str("    exit 1\n");
    script.push_str("  fi\n");
    script.push_str("fi\n");

    script.push_str(&format!("export SPRITE_NAME={}\n", quote(params.sprite_name)));
    script.push_str(&format!("export MAX_ITERATIONS={}\n", params.max_iterations));
    script.push_str(&format!("export MAX_TOKENS={}\n", params.max_tokens));
    script.push_str(&format!("export MAX_TIME_SEC={}\n", params.max_time_sec));
    script.push_str(&format!("export REQUIRED_AGENT_FLAGS={}\n", quote(&required_flags())));

    script.push_str(&format!(
        "nohup \"$AGENT_BIN\" loop < {prompt} > {log} 2>&1 &\n",
        prompt = quote(params.prompt_path),
        log = quote(params.log_path),
    ));
    script.push_str("pid=$!\n");
    script.push_str("echo \"$pid\" > agent.pid\n");
    script.push_str("echo \"$pid\" > ralph.pid\n");
    script.push_str("echo \"PID: $pid\"\n");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_command_carries_caps_and_required_flags() {
        let params = LoopParams {
            workspace: "/home/sprite/workspace",
            sprite_name: "sprite-7",
            prompt_path: "/home/sprite/workspace/PROMPT.md",
            log_path: "/home/sprite/workspace/ralph.log",
            max_iterations: 50,
            max_tokens: 200_000,
            max_time_sec: 1_800,
        };
        let script = build_loop_script(&params);
        assert!(script.contains("MAX_TOKENS=200000"));
        assert!(script.contains("MAX_TIME_SEC=1800"));
        assert!(script.contains("MAX_ITERATIONS=50"));
        assert!(script.contains("--dangerously-skip-permissions"));
        assert!(script.contains("echo \"$pid\" > agent.pid"));
        assert!(script.contains("echo \"$pid\" > ralph.pid"));
    }

    #[test]
    fn kills_previously_recorded_pid_before_relaunching() {
        let params = LoopParams {
            workspace: "/ws",
            sprite_name: "sprite-1",
            prompt_path: "/ws/PROMPT.md",
            log_path: "/ws/ralph.log",
            max_iterations: 1,
            max_tokens: 1,
            max_time_sec: 1,
        };
        let script = build_loop_script(&params);
        assert!(script.contains("kill \"$oldpid\""));
    }
}
