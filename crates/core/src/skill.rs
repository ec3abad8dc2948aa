// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved skill bundles, ready to upload (output of `oj-skills`).

use std::path::PathBuf;

/// One file inside a resolved skill bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillFile {
    pub local_path: PathBuf,
    /// Path relative to the bundle's remote root, e.g. `SKILL.md`.
    pub remote_rel_path: String,
    pub size: u64,
}

/// A skill bundle resolved and validated against the upload limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMount {
    /// Bundle name, matches `^[a-z][a-z0-9-]*$`; becomes the remote subdirectory.
    pub name: String,
    pub local_root: PathBuf,
    /// Absolute remote path the bundle is mounted at.
    pub remote_root: String,
    /// Files sorted by `remote_rel_path` for deterministic upload order.
    pub files: Vec<SkillFile>,
}

impl SkillMount {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
