// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch Events (spec §3): the append-only observability stream C7
//! emits. Durability is the `EventLogger`'s responsibility, not C7's.

use crate::state::DispatchState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DispatchEvent {
    DispatchStarted { sprite: String, execute: bool },
    StateTransition { sprite: String, from: DispatchState, to: DispatchState },
    AgentStarted { sprite: String, pid: Option<u32> },
    Done { sprite: String, state: DispatchState },
    Error { sprite: String, step: Option<String>, message: String },
}

impl DispatchEvent {
    pub fn sprite(&self) -> &str {
        match self {
            DispatchEvent::DispatchStarted { sprite, .. }
            | DispatchEvent::StateTransition { sprite, .. }
            | DispatchEvent::AgentStarted { sprite, .. }
            | DispatchEvent::Done { sprite, .. }
            | DispatchEvent::Error { sprite, .. } => sprite,
        }
    }
}
