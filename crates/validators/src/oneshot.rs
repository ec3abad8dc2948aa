// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Oneshot invariant check (spec §4.1/§4.4, C4).
//!
//! Guards against the built start command silently regressing: a
//! missing `--dangerously-skip-permissions` blocks on a permissions
//! prompt the dispatcher will never see, and a missing
//! `--output-format stream-json` produces output the watchdog and log
//! tooling can't parse. Applies to both oneshot and loop start
//! commands — the Required Agent Flags are the same single source of
//! truth for both (spec §4.1).

const REQUIRED_TOKENS: &[&str] = &["claude -p", "--dangerously-skip-permissions", "--verbose", "--output-format stream-json"];

/// Check that `start_command` literally contains every required token,
/// in any order. Returns the missing tokens, if any.
pub fn validate_oneshot_invariant(start_command: &str) -> Result<(), Vec<String>> {
    let missing: Vec<String> = REQUIRED_TOKENS
        .iter()
        .filter(|token| !start_command.contains(*token))
        .map(|token| token.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_command() -> String {
        "claude -p --dangerously-skip-permissions --permission-mode bypassPermissions --verbose --output-format stream-json < PROMPT.md".to_string()
    }

    #[test]
    fn accepts_a_command_carrying_every_required_token() {
        assert!(validate_oneshot_invariant(&well_formed_command()).is_ok());
    }

    #[test]
    fn tokens_may_appear_in_any_order() {
        let command = "claude -p --output-format stream-json --verbose --dangerously-skip-permissions < PROMPT.md".to_string();
        assert!(validate_oneshot_invariant(&command).is_ok());
    }

    #[test]
    fn names_the_missing_token() {
        let command = "claude -p --verbose --output-format stream-json < PROMPT.md".to_string();
        let missing = validate_oneshot_invariant(&command).unwrap_err();
        assert_eq!(missing, vec!["--dangerously-skip-permissions".to_string()]);
    }

    #[test]
    fn names_every_missing_token() {
        let missing = validate_oneshot_invariant("claude -p").unwrap_err();
        assert_eq!(missing.len(), 3);
    }
}
