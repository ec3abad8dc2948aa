// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help and usage output specs.

use crate::prelude::*;

#[test]
fn oj_no_args_shows_usage_and_exits_nonzero() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn oj_help_shows_usage() {
    cli().args(["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn oj_dispatch_help_shows_flags() {
    cli().args(["dispatch", "--help"]).passes().stdout_has("--execute").stdout_has("--issue-policy");
}

#[test]
fn oj_registry_help_shows_subcommands() {
    cli()
        .args(["registry", "--help"])
        .passes()
        .stdout_has("init")
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("register");
}

#[test]
fn oj_watchdog_help_shows_sprite_flag() {
    cli().args(["watchdog", "--help"]).passes().stdout_has("--sprite");
}

#[test]
fn oj_version_shows_version() {
    cli().args(["--version"]).passes().stdout_has("0.2");
}
