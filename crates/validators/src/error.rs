// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("sprite name {0:?} is not a valid DNS-label-shaped name")]
    InvalidSpriteName(String),

    #[error("repo slug {0:?} is not in owner/repo form")]
    InvalidRepoSlug(String),

    #[error("a direct Anthropic API key was detected in the environment (prefix {key_prefix}); pass --allow-direct-api-key to bypass the proxy deliberately")]
    DirectApiKeyRefused { key_prefix: String },

    #[error("issue-based dispatch is disabled by policy")]
    IssueDispatchDisabled,

    #[error("issue-based dispatch requires an explicit repo under this policy")]
    IssueRequiresExplicitRepo,
}
