// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work delta (spec §3, §4.8): did the agent produce anything?

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDelta {
    pub commits: u32,
    pub prs: u32,
    pub has_changes: bool,
    pub dirty_files: u32,
    pub verification_failed: bool,
    pub verification_error: Option<String>,
}

impl WorkDelta {
    /// No commits, no PR, repo clean.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Delta computation itself failed; distinct from "verified no changes".
    pub fn verification_failure(message: impl Into<String>) -> Self {
        Self { verification_failed: true, verification_error: Some(message.into()), ..Self::default() }
    }
}
