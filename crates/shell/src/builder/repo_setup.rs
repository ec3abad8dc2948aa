// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repo setup script builder (spec §4.1, C1).
//!
//! Configures a credential helper from `GITHUB_TOKEN`/`GH_TOKEN` before
//! any git operation needing auth, then either clones the repository
//! for the first time or resets an existing checkout to a clean state
//! on the default branch — discarding local changes, checking out the
//! branch `origin/HEAD` points at, fetching, and hard-resetting to the
//! tracked upstream. Emits progress lines with elapsed seconds.

use crate::quote::quote;

pub fn build_repo_setup_script(workspace: &str, clone_url: &str, dir_name: &str) -> String {
    let mut script = String::new();
    script.push_str("set -euo pipefail\n");
    script.push_str("START_TS=$(date +%s)\n");
    script.push_str("progress() { echo \"[$(( $(date +%s) - START_TS ))s] $1\"; }\n");
    script.push_str(&format!("mkdir -p {}\n", quote(workspace)));
    script.push_str(&format!("cd {}\n", quote(workspace)));

    script.push_str("if [ -n \"${GITHUB_TOKEN:-}${GH_TOKEN:-}\" ]; then\n");
    script.push_str(
        "  git config --global credential.helper '!f() { echo \"password=${GITHUB_TOKEN:-$GH_TOKEN}\"; echo \"username=x-access-token\"; }; f'\n",
    );
    script.push_str("fi\n");

    script.push_str(&format!("if [ -d {dir}/.git ]; then\n", dir = quote(dir_name)));
    script.push_str("  progress \"resetting existing checkout\"\n");
    script.push_str(&format!("  cd {}\n", quote(dir_name)));
    script.push_str("  git fetch origin\n");
    script.push_str(
        "  default_branch=$(git symbolic-ref refs/remotes/origin/HEAD | sed 's@^refs/remotes/origin/@@')\n",
    );
    script.push_str("  git checkout \"$default_branch\"\n");
    script.push_str("  git reset --hard \"origin/$default_branch\"\n");
    script.push_str("  git clean -fdx\n");
    script.push_str("else\n");
    script.push_str(&format!(
        "  progress \"cloning {url}\"\n",
        url = clone_url
    ));
    script.push_str(&format!(
        "  git clone {url} {dir}\n",
        url = quote(clone_url),
        dir = quote(dir_name),
    ));
    script.push_str("fi\n");
    script.push_str("progress \"repo ready\"\n");
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_progress_lines_with_elapsed_seconds() {
        let script = build_repo_setup_script("/ws", "https://github.com/acme/widgets.git", "widgets");
        assert!(script.contains("progress()"));
        assert!(script.contains("START_TS"));
    }

    #[test]
    fn clone_branch_is_discovered_from_origin_head() {
        let script = build_repo_setup_script("/ws", "https://github.com/acme/widgets.git", "widgets");
        assert!(script.contains("refs/remotes/origin/HEAD"));
        assert!(script.contains("git reset --hard \"origin/$default_branch\""));
    }

    #[test]
    fn configures_credential_helper_conditionally() {
        let script = build_repo_setup_script("/ws", "https://github.com/acme/widgets.git", "widgets");
        assert!(script.contains("GITHUB_TOKEN"));
        assert!(script.contains("credential.helper"));
    }
}
