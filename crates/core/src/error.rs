// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch error taxonomy (spec §7).
//!
//! Every pipeline step wraps its underlying error in [`DispatchError::Step`]
//! with a short phrase naming the step; safety and invariant errors
//! (`DirectAnthropicKey`, `SecretInCommand`, `InvariantViolation`, ...) are
//! surfaced unchanged so callers can match on the specific kind without
//! parsing message text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("sprite \"{0}\" not found in registry (run `oj registry init` first?)")]
    SpriteNotInRegistry(String),

    #[error("registry not found at {0} (run `oj registry init` first)")]
    RegistryNotFound(String),

    #[error("sprite \"{sprite}\" unreachable: {reason}")]
    SpriteUnreachable { sprite: String, reason: String },

    #[error("direct Anthropic API key detected (prefix {key_prefix}); pass allow_direct_api_key to override")]
    DirectAnthropicKey { key_prefix: String },

    #[error("refusing to run command: secret-looking token detected")]
    SecretInCommand,

    #[error("oneshot invariant violation: missing required token(s): {missing:?}")]
    InvariantViolation { missing: Vec<String> },

    #[error("issue #{issue} in {repo} is not ready for dispatch: {reason}")]
    IssueNotReady { issue: u64, repo: String, reason: String },

    #[error("sprite \"{sprite}\" is not part of the loaded composition; valid sprites: {valid:?}")]
    OrphanSprite { sprite: String, valid: Vec<String> },

    #[error("illegal state transition: {state} does not accept event {event}")]
    InvalidStateTransition { state: String, event: String },

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("{step}: {source}")]
    Step { step: &'static str, #[source] source: Box<DispatchError> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Wrap `self` with the name of the pipeline step that produced it.
    pub fn at_step(self, step: &'static str) -> Self {
        DispatchError::Step { step, source: Box::new(self) }
    }

    /// The step-specific code used for the error event (spec §7), if any.
    pub fn step_code(&self) -> Option<&'static str> {
        match self {
            DispatchError::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wrapping_preserves_source_message() {
        let err = DispatchError::SecretInCommand.at_step("validate_command");
        assert_eq!(err.step_code(), Some("validate_command"));
        assert!(err.to_string().contains("validate_command"));
        assert!(err.to_string().contains("secret-looking"));
    }
}
