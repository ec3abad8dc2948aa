// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oneshot script builder (spec §4.1, C1).
//!
//! Removes stale signal files, optionally ensures the local proxy is up
//! and exports its env vars, runs the agent once with the prompt piped
//! in, captures combined stdout+stderr through a PTY wrapper (falling
//! back to a plain redirect when `script(1)` is unavailable), deletes
//! the prompt file, and exits with the agent's exit code.

use crate::flags::as_str as required_flags;
use crate::quote::quote;
use crate::signals::clean_only_signals_script;

pub struct OneshotParams<'a> {
    pub workspace: &'a str,
    pub prompt_path: &'a str,
    pub log_path: &'a str,
    /// Shell snippet that starts the local proxy if it isn't already
    /// running; embedded verbatim before the agent invocation.
    pub proxy_ensure_script: Option<&'a str>,
    /// Env vars to export for the agent process once the proxy is up,
    /// e.g. `ANTHROPIC_BASE_URL`.
    pub proxy_env: &'a [(String, String)],
}

pub fn build_oneshot_script(params: &OneshotParams<'_>) -> String {
    let mut script = String::new();
    script.push_str("set -euo pipefail\n");
    script.push_str(&format!("mkdir -p {}\n", quote(params.workspace)));
    script.push_str(&format!("cd {}\n", quote(params.workspace)));
    script.push_str(&clean_only_signals_script(params.workspace));
    script.push('\n');

    if let Some(proxy_script) = params.proxy_ensure_script {
        script.push_str(proxy_script);
        script.push('\n');
    }
    for (key, value) in params.proxy_env {
        script.push_str(&format!("export {}={}\n", key, quote(value)));
    }

    script.push_str(&format!(
        "export REQUIRED_AGENT_FLAGS={}\n",
        quote(&required_flags())
    ));

    let agent_cmd = format!(
        "claude -p {flags} < {prompt}",
        flags = required_flags(),
        prompt = quote(params.prompt_path),
    );
    script.push_str("if command -v script >/dev/null 2>&1; then\n");
    script.push_str(&format!(
        "  script -qefc {cmd} {log}\n",
        cmd = quote(&agent_cmd),
        log = quote(params.log_path),
    ));
    script.push_str("  code=$?\n");
    script.push_str("else\n");
    script.push_str(&format!("  {agent_cmd} > {log} 2>&1\n", log = quote(params.log_path)));
    script.push_str("  code=$?\n");
    script.push_str("fi\n");
    script.push_str(&format!("rm -f {}\n", quote(params.prompt_path)));
    script.push_str("echo \"PID: $$\"\n");
    script.push_str("exit $code\n");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_self_contained_script_with_required_flags() {
        let params = OneshotParams {
            workspace: "/home/sprite/workspace",
            prompt_path: "/home/sprite/workspace/PROMPT.md",
            log_path: "/home/sprite/workspace/dispatch.log",
            proxy_ensure_script: None,
            proxy_env: &[],
        };
        let script = build_oneshot_script(&params);
        assert!(script.contains("--dangerously-skip-permissions"));
        assert!(script.contains("--output-format stream-json"));
        assert!(script.contains("rm -f '/home/sprite/workspace/PROMPT.md'"));
        assert!(script.ends_with("exit $code\n"));
    }

    #[test]
    fn embeds_proxy_snippet_and_env_when_present() {
        let env = vec![("ANTHROPIC_BASE_URL".to_string(), "http://127.0.0.1:9000".to_string())];
        let params = OneshotParams {
            workspace: "/ws",
            prompt_path: "/ws/PROMPT.md",
            log_path: "/ws/dispatch.log",
            proxy_ensure_script: Some("ensure_proxy_running"),
            proxy_env: &env,
        };
        let script = build_oneshot_script(&params);
        assert!(script.contains("ensure_proxy_running"));
        assert!(script.contains("export ANTHROPIC_BASE_URL='http://127.0.0.1:9000'"));
    }
}
