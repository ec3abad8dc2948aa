// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Result` of a dispatch (spec §3): what `oj dispatch` prints and
//! what a caller embedding the engine gets back. Dry-run runs stop
//! after producing the [`Plan`]; `Executed` carries everything a real
//! run observed.

use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::state::DispatchState;
use crate::work_delta::WorkDelta;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchOutcome {
    DryRun { plan: Plan },
    Executed {
        plan: Plan,
        final_state: DispatchState,
        pid: Option<u64>,
        work_delta: Option<WorkDelta>,
        /// Whether this run provisioned a new machine, as opposed to
        /// reusing one already known to the registry or the live fleet.
        provisioned: bool,
        /// First line of the agent's captured output, for a quick
        /// at-a-glance summary without fetching the full log.
        first_line_output: Option<String>,
        /// Remote path of the full combined stdout+stderr log.
        log_path: String,
    },
}

impl DispatchOutcome {
    pub fn plan(&self) -> &Plan {
        match self {
            DispatchOutcome::DryRun { plan } | DispatchOutcome::Executed { plan, .. } => plan,
        }
    }
}
