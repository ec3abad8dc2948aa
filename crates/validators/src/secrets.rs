// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential-leak scanning (spec §4.4, C4).
//!
//! A best-effort scan over a built command string for the three
//! prefix+length patterns spec §4.4 defines as "looks like a live
//! credential". Length thresholds are chosen to admit `${VAR}`-style
//! bash expansion (which never carries a run of the required charset
//! right after the prefix) while still catching a real key pasted into
//! a prompt or command. Not a substitute for secret-scanning at the
//! source; this exists to catch an operator accident before it's
//! shipped to a worker and logged.

/// `true` iff `text` contains an anthropic key (`sk-ant-api` + at least
/// one alphanumeric), an openrouter key (`sk-or-v1-` + at least 8 hex
/// digits), or a github PAT (`ghp_` + at least 4 alphanumerics).
pub fn contains_secret(text: &str) -> bool {
    has_prefixed_run(text, "sk-ant-api", 1, |c| c.is_ascii_alphanumeric())
        || has_prefixed_run(text, "sk-or-v1-", 8, |c| c.is_ascii_hexdigit())
        || has_prefixed_run(text, "ghp_", 4, |c| c.is_ascii_alphanumeric())
}

/// Whether any occurrence of `prefix` in `text` is immediately followed
/// by at least `min_len` characters matching `charset`.
fn has_prefixed_run(text: &str, prefix: &str, min_len: usize, charset: fn(char) -> bool) -> bool {
    text.match_indices(prefix).any(|(pos, _)| {
        let after = &text[pos + prefix.len()..];
        after.chars().take_while(|c| charset(*c)).count() >= min_len
    })
}
