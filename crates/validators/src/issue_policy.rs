// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Issue dispatch policy (spec §4.4, C4).
//!
//! Governs whether a `DispatchRequest` built from a tracked issue
//! (rather than a literal prompt) is accepted at all, and how strictly
//! the repo it targets must be pinned down.

use oj_core::DispatchRequest;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssuePolicy {
    /// Issue-based dispatch is refused outright.
    Off,
    /// Issue-based dispatch is allowed; an implied repo (from the
    /// worker registry's prior assignment, say) is fine.
    #[default]
    Advisory,
    /// Issue-based dispatch is allowed only when the request pins an
    /// explicit repo — no falling back to an implied one.
    Strict,
}

pub fn validate_issue_policy(request: &DispatchRequest, policy: IssuePolicy) -> Result<(), ValidationError> {
    let Some(issue) = &request.issue else {
        return Ok(());
    };

    match policy {
        IssuePolicy::Off => Err(ValidationError::IssueDispatchDisabled),
        IssuePolicy::Advisory => Ok(()),
        IssuePolicy::Strict => {
            if issue.repo.is_some() || request.repo.is_some() {
                Ok(())
            } else {
                Err(ValidationError::IssueRequiresExplicitRepo)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_issue() -> DispatchRequest {
        let mut request = DispatchRequest::new("sprite-1", "");
        request.prompt = None;
        request.issue = Some(oj_core::IssueRef { repo: None, number: 42 });
        request
    }

    #[test]
    fn off_refuses_any_issue_dispatch() {
        assert!(validate_issue_policy(&with_issue(), IssuePolicy::Off).is_err());
    }

    #[test]
    fn advisory_allows_implied_repo() {
        assert!(validate_issue_policy(&with_issue(), IssuePolicy::Advisory).is_ok());
    }

    #[test]
    fn strict_requires_explicit_repo() {
        assert!(validate_issue_policy(&with_issue(), IssuePolicy::Strict).is_err());

        let mut request = with_issue();
        request.repo = Some("acme/widgets".to_string());
        assert!(validate_issue_policy(&request, IssuePolicy::Strict).is_ok());
    }

    #[test]
    fn non_issue_dispatch_is_unaffected_by_policy() {
        let request = DispatchRequest::new("sprite-1", "do thing");
        assert!(validate_issue_policy(&request, IssuePolicy::Off).is_ok());
    }
}
