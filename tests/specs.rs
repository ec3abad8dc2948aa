// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level CLI specs: drives the built `oj` binary through
//! `assert_cmd` rather than calling crate internals directly.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli/help.rs"]
mod cli_help;

#[path = "specs/registry/lifecycle.rs"]
mod registry_lifecycle;

#[path = "specs/dispatch/dry_run.rs"]
mod dispatch_dry_run;
