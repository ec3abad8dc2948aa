// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proxy lifecycle (spec §4.8, C8).
//!
//! Agent traffic is routed through a local proxy on the worker so it
//! can be attributed and rate-limited per sprite rather than hitting
//! the provider directly with a bare API key (see
//! `oj_validators::direct_key`). `ensure_proxy` is idempotent: if the
//! proxy is already listening on its port it's left alone.

use std::time::Duration;

use oj_adapters::RemoteClient;
use oj_core::DispatchError;

const DEFAULT_PROXY_PORT: u16 = 8787;
const EXEC_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyHandle {
    pub base_url: String,
    pub env: Vec<(String, String)>,
}

/// The shell snippet embedded into C1 scripts (oneshot/loop) to start
/// the proxy in-process before the agent runs, in case the pipeline's
/// own `ensure_proxy` step hasn't run for this particular invocation
/// (e.g. a ralph loop restarting outside orchestrator control).
pub fn ensure_proxy_snippet(port: u16, token: &str) -> String {
    format!(
        "if ! curl -s -o /dev/null http://127.0.0.1:{port}/healthz; then \
         nohup oj-proxy --port {port} --token {token} > /tmp/oj-proxy.log 2>&1 & \
         for i in 1 2 3 4 5 6 7 8 9 10; do \
           curl -s -o /dev/null http://127.0.0.1:{port}/healthz && break; \
           sleep 0.5; \
         done; \
         fi"
    )
}

/// Confirm the worker's proxy is up, starting it over `exec` if not,
/// and return the env vars the agent invocation should carry.
pub async fn ensure_proxy(
    remote: &dyn RemoteClient,
    sprite: &str,
    token: &str,
) -> Result<ProxyHandle, DispatchError> {
    let port = DEFAULT_PROXY_PORT;
    let script = ensure_proxy_snippet(port, token);
    remote
        .exec(sprite, &script, EXEC_TIMEOUT)
        .await
        .map_err(|e| DispatchError::Remote(e.to_string()))?;

    let base_url = format!("http://127.0.0.1:{port}");
    Ok(ProxyHandle {
        env: vec![
            ("ANTHROPIC_BASE_URL".to_string(), base_url.clone()),
            ("ANTHROPIC_AUTH_TOKEN".to_string(), token.to_string()),
        ],
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oj_adapters::test_support::FakeRemoteClient;
    use oj_adapters::ExecOutput;

    #[tokio::test]
    async fn ensure_proxy_returns_loopback_base_url_and_token_env() {
        let remote = FakeRemoteClient::new().with_exec_response(
            "sprite-1",
            ExecOutput { combined_output: String::new(), exit_code: Some(0), pid: None },
        );
        let handle = ensure_proxy(&remote, "sprite-1", "secret-token").await.unwrap();
        assert_eq!(handle.base_url, "http://127.0.0.1:8787");
        assert!(handle.env.iter().any(|(k, v)| k == "ANTHROPIC_AUTH_TOKEN" && v == "secret-token"));
    }

    #[test]
    fn snippet_checks_healthz_before_starting() {
        let snippet = ensure_proxy_snippet(8787, "tok");
        assert!(snippet.contains("healthz"));
        assert!(snippet.contains("--port 8787"));
    }
}
