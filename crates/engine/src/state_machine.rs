// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch state machine (spec §3/§4.6, C6).
//!
//! A single declarative transition table. Every legal (state, event)
//! pair is listed explicitly; anything not listed is rejected with
//! [`DispatchError::InvalidStateTransition`] rather than silently
//! ignored or defaulted.

use oj_core::{DispatchError, DispatchState, StateEvent};

/// Apply `event` to `state`, returning the resulting state or an
/// error naming the illegal pair.
pub fn advance(state: DispatchState, event: StateEvent) -> Result<DispatchState, DispatchError> {
    use DispatchState::*;
    use StateEvent::*;

    let next = match (state, event) {
        (Pending, Provision) => Provisioning,
        (Provisioning, Provisioned) => Ready,
        // A sprite already provisioned and alive skips straight to Ready
        // without ever entering Provisioning.
        (Pending, Ready) => Ready,
        (Ready, UploadPrompt) => PromptUploaded,
        (PromptUploaded, StartAgent) => Running,
        (Running, Complete) => Completed,

        (Pending, Failure)
        | (Provisioning, Failure)
        | (Ready, Failure)
        | (PromptUploaded, Failure)
        | (Running, Failure) => Failed,

        _ => {
            return Err(DispatchError::InvalidStateTransition {
                state: state.to_string(),
                event: event.to_string(),
            })
        }
    };
    Ok(next)
}

/// Whether `state` is terminal — no event legally advances it further.
pub fn is_terminal(state: DispatchState) -> bool {
    matches!(state, DispatchState::Completed | DispatchState::Failed)
}
