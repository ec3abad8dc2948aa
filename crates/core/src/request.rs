// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch request: the operator's input, immutable once accepted.

use std::path::PathBuf;
use std::time::Duration;

/// A reference to a tracked issue, used to generate a prompt when none is
/// supplied directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub repo: Option<String>,
    pub number: u64,
}

/// One dispatch request as received from an operator.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub sprite: String,
    pub prompt: Option<String>,
    pub repo: Option<String>,
    pub skills: Vec<PathBuf>,
    pub issue: Option<IssueRef>,
    pub ralph: bool,
    pub execute: bool,
    pub webhook_url: Option<String>,
    pub allow_direct_api_key: bool,
    pub allow_orphan: bool,
    pub max_tokens: u64,
    pub max_time: Duration,
}

impl DispatchRequest {
    /// Construct a oneshot, dry-run request with just the required fields.
    /// Convenience for callers and tests; all optional fields default empty.
    pub fn new(sprite: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            sprite: sprite.into(),
            prompt: Some(prompt.into()),
            repo: None,
            skills: Vec::new(),
            issue: None,
            ralph: false,
            execute: false,
            webhook_url: None,
            allow_direct_api_key: false,
            allow_orphan: false,
            max_tokens: 200_000,
            max_time: Duration::from_secs(1800),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl DispatchRequest {
    pub fn builder(sprite: impl Into<String>) -> DispatchRequestBuilder {
        DispatchRequestBuilder::new(sprite)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct DispatchRequestBuilder {
    inner: DispatchRequest,
}

#[cfg(any(test, feature = "test-support"))]
impl DispatchRequestBuilder {
    fn new(sprite: impl Into<String>) -> Self {
        Self { inner: DispatchRequest::new(sprite, "") }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.inner.prompt = Some(prompt.into());
        self
    }

    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.inner.repo = Some(repo.into());
        self
    }

    pub fn skill(mut self, path: impl Into<PathBuf>) -> Self {
        self.inner.skills.push(path.into());
        self
    }

    pub fn issue(mut self, number: u64, repo: Option<String>) -> Self {
        self.inner.issue = Some(IssueRef { repo, number });
        self
    }

    pub fn ralph(mut self, ralph: bool) -> Self {
        self.inner.ralph = ralph;
        self
    }

    pub fn execute(mut self, execute: bool) -> Self {
        self.inner.execute = execute;
        self
    }

    pub fn allow_direct_api_key(mut self, allow: bool) -> Self {
        self.inner.allow_direct_api_key = allow;
        self
    }

    pub fn allow_orphan(mut self, allow: bool) -> Self {
        self.inner.allow_orphan = allow;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u64) -> Self {
        self.inner.max_tokens = max_tokens;
        self
    }

    pub fn max_time(mut self, max_time: Duration) -> Self {
        self.inner.max_time = max_time;
        self
    }

    pub fn build(self) -> DispatchRequest {
        self.inner
    }
}
