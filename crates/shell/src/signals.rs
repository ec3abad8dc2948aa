// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The signal-file vocabulary (spec §4.2, C2).
//!
//! A closed set of marker filenames sprites write to their workspace root
//! to report completion or a blocked state, plus `PR_URL` for a pull
//! request link. `TASK_COMPLETE` and `TASK_COMPLETE.md` are equivalent;
//! so are `BLOCKED.md` and `BLOCKED`. `PR_URL` is not a completion/blocked
//! signal and survives a signals-only clean.

use crate::quote::quote;

pub const TASK_COMPLETE: &str = "TASK_COMPLETE";
pub const TASK_COMPLETE_MD: &str = "TASK_COMPLETE.md";
pub const BLOCKED_MD: &str = "BLOCKED.md";
pub const BLOCKED: &str = "BLOCKED";
pub const PR_URL: &str = "PR_URL";

/// The four signal filenames (complete + blocked), not including `PR_URL`.
pub fn all() -> &'static [&'static str] {
    &[TASK_COMPLETE, TASK_COMPLETE_MD, BLOCKED_MD, BLOCKED]
}

/// Remove every signal file and `PR_URL` from `workspace`.
pub fn clean_script(workspace: &str) -> String {
    let mut names = all().to_vec();
    names.push(PR_URL);
    rm_script(workspace, &names)
}

/// Remove the four signal files but preserve `PR_URL`.
pub fn clean_only_signals_script(workspace: &str) -> String {
    rm_script(workspace, all())
}

fn rm_script(workspace: &str, names: &[&str]) -> String {
    let files: Vec<String> = names.iter().map(|n| quote(n)).collect();
    format!("cd {} && rm -f {}", quote(workspace), files.join(" "))
}

/// Shell snippet exiting 0 iff either completion signal is present.
pub fn detect_complete_script(workspace: &str) -> String {
    format!(
        "cd {ws} && {{ [ -f {a} ] || [ -f {b} ]; }}",
        ws = quote(workspace),
        a = quote(TASK_COMPLETE),
        b = quote(TASK_COMPLETE_MD),
    )
}

/// Shell snippet exiting 0 iff either blocked signal is present.
pub fn detect_blocked_script(workspace: &str) -> String {
    format!(
        "cd {ws} && {{ [ -f {a} ] || [ -f {b} ]; }}",
        ws = quote(workspace),
        a = quote(BLOCKED_MD),
        b = quote(BLOCKED),
    )
}

/// Shell snippet printing the contents of `PR_URL` if it exists and is
/// non-empty, otherwise nothing.
pub fn extract_pr_url_script(workspace: &str) -> String {
    format!(
        "cd {ws} && [ -s {f} ] && cat {f} || true",
        ws = quote(workspace),
        f = quote(PR_URL),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_four_signals_excluding_pr_url() {
        assert_eq!(all().len(), 4);
        assert!(!all().contains(&PR_URL));
    }

    #[test]
    fn clean_script_removes_pr_url_too() {
        let script = clean_script("/home/sprite/workspace");
        assert!(script.contains("'PR_URL'"));
        assert!(script.contains("'TASK_COMPLETE'"));
    }

    #[test]
    fn clean_only_signals_script_preserves_pr_url() {
        let script = clean_only_signals_script("/home/sprite/workspace");
        assert!(!script.contains("PR_URL"));
    }

    #[test]
    fn detect_scripts_reference_both_name_variants() {
        let complete = detect_complete_script("/ws");
        assert!(complete.contains("TASK_COMPLETE") && complete.contains("TASK_COMPLETE.md"));
        let blocked = detect_blocked_script("/ws");
        assert!(blocked.contains("BLOCKED.md") && blocked.contains("BLOCKED"));
    }
}
