// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prepared request: a `DispatchRequest` plus everything resolved from it
//! (spec §3). Constructed once by `oj_engine::orchestrator::prepare`; never
//! mutated afterward.

use crate::repo::RepoTarget;
use crate::request::DispatchRequest;
use crate::skill::SkillMount;

pub const DEFAULT_WORKSPACE: &str = "/home/sprite/workspace";

/// Remote paths on the worker, derived from its workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritePaths {
    pub workspace: String,
}

impl SpritePaths {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self { workspace: workspace.into() }
    }

    pub fn default_for(_sprite: &str) -> Self {
        Self::new(DEFAULT_WORKSPACE)
    }

    /// Join a relative path onto the workspace root.
    pub fn join(&self, rel: &str) -> String {
        format!("{}/{}", self.workspace.trim_end_matches('/'), rel.trim_start_matches('/'))
    }
}

/// Metadata about the fleet this worker belongs to, when a composition is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningMeta {
    pub app: Option<String>,
    pub known_sprites: Vec<String>,
}

/// A `DispatchRequest` with everything resolved: repo target, skill
/// mounts, rendered prompt, start command, computed paths.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub request: DispatchRequest,
    pub repo: Option<RepoTarget>,
    pub skills: Vec<SkillMount>,
    pub prompt: String,
    pub start_command: String,
    pub task_label: String,
    pub paths: SpritePaths,
    pub provisioning: ProvisioningMeta,
}

/// Truncate `s` to at most `max_len` characters, appending an ellipsis
/// when truncated (spec §4.7 step 1: task label ≤220 chars).
pub fn ellipsize(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(1);
    let truncated: String = s.chars().take(keep).collect();
    format!("{truncated}…")
}
