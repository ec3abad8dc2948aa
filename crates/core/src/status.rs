// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `STATUS.json` file the dispatcher writes to a sprite's
//! workspace (spec §4.7 steps 13/18, §6): observable by the
//! supervisory watchdog without needing to parse log output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Oneshot,
    Ralph,
}

/// Serialized verbatim to `STATUS.json` on upload (step 13), then
/// re-uploaded with the completion fields set (step 18, oneshot only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusFile {
    pub repo: Option<String>,
    pub started: DateTime<Utc>,
    pub mode: DispatchMode,
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl StatusFile {
    pub fn started(repo: Option<String>, mode: DispatchMode, task: String, started: DateTime<Utc>) -> Self {
        Self { repo, started, mode, task, status: None, completed: None, exit_code: None }
    }

    /// Mark the run complete and return the JSON bytes to re-upload.
    pub fn completed_json(&self, completed: DateTime<Utc>, exit_code: Option<i32>) -> serde_json::Result<String> {
        let mut done = self.clone();
        done.status = Some("completed".to_string());
        done.completed = Some(completed);
        done.exit_code = exit_code;
        serde_json::to_string_pretty(&done)
    }
}
