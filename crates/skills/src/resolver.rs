// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Skill bundle resolution (spec §4.5, C5).
//!
//! Walks a local directory into a [`SkillMount`], rejecting symlinks
//! and non-regular files outright (a mount is uploaded file-by-file;
//! a symlink would either dangle on the remote side or silently
//! escape the bundle root) and enforcing the per-file, per-bundle, and
//! per-mount limits before anything is handed to an uploader.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use oj_core::{SkillFile, SkillMount};
use walkdir::WalkDir;

use crate::error::SkillError;
use crate::limits::{MAX_BUNDLE_BYTES, MAX_FILES_PER_BUNDLE, MAX_FILE_BYTES, MAX_MOUNTS};

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Resolve one local skill directory into a mount under `workspace`.
pub fn resolve_skill(local_root: &Path, workspace: &str) -> Result<SkillMount, SkillError> {
    let name = local_root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !is_valid_name(&name) {
        return Err(SkillError::InvalidName(name));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(local_root).follow_links(false) {
        let entry = entry.map_err(|e| {
            SkillError::Unreadable(local_root.to_path_buf(), e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk error")
            }))
        })?;

        if entry.path_is_symlink() {
            return Err(SkillError::Symlink(entry.path().to_path_buf()));
        }
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() {
            return Err(SkillError::NotRegularFile(entry.path().to_path_buf()));
        }

        let metadata = fs::metadata(entry.path())
            .map_err(|e| SkillError::Unreadable(entry.path().to_path_buf(), e))?;
        let size = metadata.len();
        if size > MAX_FILE_BYTES {
            return Err(SkillError::FileTooLarge { path: entry.path().to_path_buf(), size, limit: MAX_FILE_BYTES });
        }

        let rel_path = entry
            .path()
            .strip_prefix(local_root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        files.push(SkillFile { local_path: entry.path().to_path_buf(), remote_rel_path: rel_path, size });
    }

    files.sort_by(|a, b| a.remote_rel_path.cmp(&b.remote_rel_path));

    if files.len() > MAX_FILES_PER_BUNDLE {
        return Err(SkillError::TooManyFiles { name, count: files.len(), limit: MAX_FILES_PER_BUNDLE });
    }
    let total: u64 = files.iter().map(|f| f.size).sum();
    if total > MAX_BUNDLE_BYTES {
        return Err(SkillError::BundleTooLarge { name, size: total, limit: MAX_BUNDLE_BYTES });
    }

    let remote_root = format!("{}/skills/{}", workspace.trim_end_matches('/'), name);
    Ok(SkillMount { name, local_root: local_root.to_path_buf(), remote_root, files })
}

/// Resolve every requested skill path into mounts, enforcing the
/// per-dispatch mount cap and rejecting duplicate bundle names.
pub fn resolve_mounts(paths: &[std::path::PathBuf], workspace: &str) -> Result<Vec<SkillMount>, SkillError> {
    if paths.len() > MAX_MOUNTS {
        return Err(SkillError::TooManyMounts(paths.len(), MAX_MOUNTS));
    }

    let mut seen = HashSet::new();
    let mut mounts = Vec::with_capacity(paths.len());
    for path in paths {
        let mount = resolve_skill(path, workspace)?;
        if !seen.insert(mount.name.clone()) {
            return Err(SkillError::DuplicateName(mount.name));
        }
        mounts.push(mount);
    }
    Ok(mounts)
}
