// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oj-shell: POSIX shell script construction for the sprite dispatch
//! system (spec §4.1/§4.2, C1/C2). Builds the literal scripts handed to
//! `RemoteClient::exec`; never runs anything itself.

pub mod builder;
pub mod flags;
pub mod paths;
pub mod quote;
pub mod signals;

pub use builder::{build_loop_script, build_oneshot_script, build_probe_script, build_repo_setup_script};
pub use builder::{LoopParams, OneshotParams};
pub use flags::REQUIRED_AGENT_FLAGS;
pub use paths::{validate_registry_path, PathError};
pub use quote::quote as shell_quote;
