// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shape validation for sprite names and repo slugs (spec §4.4, C4).

use crate::error::ValidationError;

const MAX_NAME_LEN: usize = 63;

/// A valid sprite name is a DNS-label shape: lowercase alphanumerics
/// and hyphens, starting and ending with an alphanumeric, 1-63 chars.
pub fn validate_sprite_name(name: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidSpriteName(name.to_string());

    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(invalid());
    }
    let bytes = name.as_bytes();
    if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
        return Err(invalid());
    }
    if !name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid());
    }
    Ok(())
}

/// A valid repo slug is `owner/repo`, each segment non-empty and free
/// of whitespace or additional slashes.
pub fn validate_repo_slug(slug: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidRepoSlug(slug.to_string());

    let mut parts = slug.split('/');
    let (owner, repo, rest) = (parts.next(), parts.next(), parts.next());
    match (owner, repo, rest) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            let valid_segment = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
            if valid_segment(owner) && valid_segment(repo) {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}
