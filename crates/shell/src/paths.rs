// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry path validation (spec §4.2/§4.3, C2/C3).
//!
//! Refuses to let the registry file live under a handful of
//! system-owned roots, including when a symlink in the path would
//! otherwise resolve there.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const FORBIDDEN_PREFIXES: &[&str] = &["/etc", "/usr", "/bin", "/sbin", "/dev", "/proc", "/sys"];

#[derive(Debug, Error)]
pub enum PathError {
    #[error("registry path {0} does not end in .toml")]
    NotToml(PathBuf),
    #[error("registry path {0} resolves under a forbidden system directory")]
    Forbidden(PathBuf),
    #[error("failed to resolve registry path: {0}")]
    Io(#[from] io::Error),
}

/// Validate and resolve a candidate registry path.
///
/// Walks up from `path` to the longest existing ancestor, canonicalizes
/// that ancestor (following any symlinks), then re-appends the
/// non-existent tail. The result is checked against [`FORBIDDEN_PREFIXES`];
/// the original (pre-canonicalization) path is checked too, so a
/// same-named but not-yet-created forbidden ancestor is still caught.
pub fn validate_registry_path(path: &Path) -> Result<PathBuf, PathError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if absolute.extension().and_then(OsStr::to_str) != Some("toml") {
        return Err(PathError::NotToml(absolute));
    }

    let resolved = resolve_through_symlinks(&absolute)?;

    for prefix in FORBIDDEN_PREFIXES {
        if resolved.starts_with(prefix) || absolute.starts_with(prefix) {
            return Err(PathError::Forbidden(resolved));
        }
    }

    Ok(resolved)
}

fn resolve_through_symlinks(path: &Path) -> io::Result<PathBuf> {
    let mut existing: &Path = path;
    let mut tail: Vec<&OsStr> = Vec::new();

    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                tail.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = if existing.as_os_str().is_empty() {
        PathBuf::from("/")
    } else {
        existing.canonicalize()?
    };

    for component in tail.into_iter().rev() {
        resolved.push(component);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn accepts_ordinary_toml_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let resolved = validate_registry_path(&path).unwrap();
        assert!(resolved.ends_with("registry.toml"));
    }

    #[test]
    fn rejects_non_toml_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        assert!(matches!(validate_registry_path(&path), Err(PathError::NotToml(_))));
    }

    #[test]
    fn rejects_literal_forbidden_prefix() {
        let path = Path::new("/etc/oj/registry.toml");
        assert!(matches!(validate_registry_path(path), Err(PathError::Forbidden(_))));
    }

    #[test]
    fn rejects_symlink_that_resolves_into_forbidden_root() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("sneaky");
        symlink("/etc", &link).unwrap();
        let path = link.join("registry.toml");
        assert!(matches!(validate_registry_path(&path), Err(PathError::Forbidden(_))));
    }
}
