// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work delta computation (spec §4.7 step 18, §4.8): did the agent's
//! run produce anything worth reporting?

use std::time::Duration;

use oj_adapters::RemoteClient;
use oj_core::{DispatchError, WorkDelta};

const EXEC_TIMEOUT: Duration = Duration::from_secs(30);

/// `true` iff `sha` looks like a full git object id: 40 hex digits.
pub fn is_valid_head(sha: &str) -> bool {
    sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
}

/// Capture the repo's current `HEAD` for later delta accounting (spec
/// §4.7 step 15). A script failure or a malformed SHA degrades to
/// "no delta available" rather than aborting the pipeline.
pub async fn capture_pre_exec_head(remote: &dyn RemoteClient, sprite: &str, repo_dir: &str) -> Option<String> {
    let script = format!("cd {repo_dir} 2>/dev/null && git rev-parse HEAD 2>/dev/null");
    let output = remote.exec(sprite, &script, EXEC_TIMEOUT).await.ok()?;
    let sha = output.combined_output.trim().to_string();
    is_valid_head(&sha).then_some(sha)
}

fn delta_script(repo_dir: &str, pre: &str) -> String {
    format!(
        "cd {repo_dir} 2>/dev/null && {{ \
         post=$(git rev-parse HEAD 2>/dev/null); \
         if [ \"$post\" = {pre} ]; then \
           echo COMMITS=0; \
           echo PRS=0; \
           echo DIRTY=$(git status --porcelain 2>/dev/null | wc -l | tr -d ' '); \
         else \
           echo COMMITS=$(git rev-list --count {pre}..\"$post\" 2>/dev/null | tr -d ' '); \
           echo PRS=$([ -s PR_URL ] && echo 1 || echo 0); \
           echo DIRTY=0; \
         fi; \
         }}",
        pre = oj_shell::shell_quote(pre),
    )
}

/// Run the delta script over `remote` and parse its output into a
/// [`WorkDelta`]. A missing `pre_head` (step 15 capture failed) or a
/// script failure is reported as [`WorkDelta::verification_failure`]
/// rather than propagated, since "we couldn't tell" is itself
/// meaningful watchdog input.
pub async fn compute_work_delta(remote: &dyn RemoteClient, sprite: &str, repo_dir: &str, pre_head: Option<&str>) -> WorkDelta {
    let Some(pre_head) = pre_head else {
        return WorkDelta::verification_failure("no pre-exec HEAD captured");
    };
    let script = delta_script(repo_dir, pre_head);
    let output = match remote.exec(sprite, &script, EXEC_TIMEOUT).await {
        Ok(output) => output,
        Err(e) => return WorkDelta::verification_failure(e.to_string()),
    };
    parse_delta_output(&output.combined_output)
}

fn parse_delta_output(output: &str) -> WorkDelta {
    let mut commits = 0u32;
    let mut prs = 0u32;
    let mut dirty_files = 0u32;
    for line in output.lines() {
        if let Some(v) = line.strip_prefix("COMMITS=") {
            commits = v.trim().parse().unwrap_or(0);
        } else if let Some(v) = line.strip_prefix("PRS=") {
            prs = v.trim().parse().unwrap_or(0);
        } else if let Some(v) = line.strip_prefix("DIRTY=") {
            dirty_files = v.trim().parse().unwrap_or(0);
        }
    }
    WorkDelta {
        commits,
        prs,
        has_changes: commits > 0 || prs > 0,
        dirty_files,
        verification_failed: false,
        verification_error: None,
    }
}

/// Wrap a [`DispatchError`] that occurred while gathering the delta,
/// for pipeline stages that do want the failure to propagate.
pub fn at_step(err: DispatchError) -> DispatchError {
    err.at_step("compute_work_delta")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_head_is_40_hex_digits() {
        assert!(is_valid_head(&"a".repeat(40)));
        assert!(!is_valid_head("not-a-sha"));
        assert!(!is_valid_head(&"a".repeat(39)));
    }

    #[test]
    fn unchanged_head_reports_dirty_files_and_no_commits() {
        let delta = parse_delta_output("COMMITS=0\nPRS=0\nDIRTY=3\n");
        assert!(!delta.has_changes);
        assert_eq!(delta.dirty_files, 3);
    }

    #[test]
    fn new_commits_count_as_changes() {
        let delta = parse_delta_output("COMMITS=2\nPRS=1\nDIRTY=0\n");
        assert!(delta.has_changes);
        assert_eq!(delta.commits, 2);
        assert_eq!(delta.prs, 1);
    }

    #[test]
    fn a_pr_with_no_new_commits_still_counts_as_changed() {
        let delta = parse_delta_output("COMMITS=0\nPRS=1\nDIRTY=0\n");
        assert!(delta.has_changes);
    }
}
