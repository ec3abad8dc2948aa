// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `RemoteClient`: the boundary between the orchestrator and a sprite's
//! actual worker process (spec §6, external interfaces).
//!
//! One implementation per transport (SSH, a Docker/K8s exec API, a
//! TCP-based agent control plane); the engine only ever talks to the
//! trait so it never cares which.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdapterError;

/// The outcome of a single `exec`: combined stdout+stderr, the exit
/// code if the process ran to completion, and the trailing PID line
/// scripts are required to emit as their final non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub combined_output: String,
    pub exit_code: Option<i32>,
    pub pid: Option<u64>,
}

impl ExecOutput {
    /// Parse the final non-blank line as either `PID: <n>` or a bare
    /// numeric PID.
    pub fn parse_pid(combined_output: &str) -> Option<u64> {
        let last_line = combined_output.lines().rev().find(|l| !l.trim().is_empty())?;
        let trimmed = last_line.trim();
        if let Some(rest) = trimmed.strip_prefix("PID:") {
            rest.trim().parse().ok()
        } else {
            trimmed.parse().ok()
        }
    }
}

#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn exec(&self, sprite: &str, script: &str, timeout: Duration) -> Result<ExecOutput, AdapterError>;

    async fn exec_with_env(
        &self,
        sprite: &str,
        script: &str,
        env: &[(String, String)],
        timeout: Duration,
    ) -> Result<ExecOutput, AdapterError>;

    async fn upload(&self, sprite: &str, remote_path: &str, contents: &[u8]) -> Result<(), AdapterError>;

    async fn list(&self, sprite: &str, remote_dir: &str) -> Result<Vec<String>, AdapterError>;

    /// Sprite names for every worker currently live in the fleet (spec
    /// §6, `List(ctx) → names`) — used to recognize a worker that's
    /// already provisioned but missing from the registry.
    async fn list_fleet(&self) -> Result<Vec<String>, AdapterError>;

    async fn probe_connectivity(&self, sprite: &str) -> Result<bool, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labeled_pid_line() {
        let output = "starting up\nPID: 4242\n";
        assert_eq!(ExecOutput::parse_pid(output), Some(4242));
    }

    #[test]
    fn parses_bare_numeric_final_line() {
        let output = "starting up\n4242\n";
        assert_eq!(ExecOutput::parse_pid(output), Some(4242));
    }

    #[test]
    fn rejects_non_numeric_final_line() {
        let output = "starting up\nsomething else\n";
        assert_eq!(ExecOutput::parse_pid(output), None);
    }

    #[test]
    fn skips_trailing_blank_lines() {
        let output = "PID: 99\n\n\n";
        assert_eq!(ExecOutput::parse_pid(output), Some(99));
    }
}
