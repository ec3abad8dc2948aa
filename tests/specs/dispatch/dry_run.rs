// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj dispatch` without `--execute`: a pure plan preview that needs
//! neither a live Kubernetes cluster nor a GitHub token.

use crate::prelude::*;

#[test]
fn dry_run_prints_the_plan_steps() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project
        .oj()
        .args(["dispatch", "sprite-1", "--prompt", "fix the flaky test"])
        .passes()
        .stdout_has("dry run")
        .stdout_has("provision")
        .stdout_has("start_agent");
}

#[test]
fn dry_run_with_repo_includes_setup_repo_step() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project
        .oj()
        .args(["dispatch", "sprite-1", "--prompt", "ship it", "--repo", "acme/widgets"])
        .passes()
        .stdout_has("setup_repo");
}

#[test]
fn dry_run_rejects_an_invalid_sprite_name() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project.oj().args(["dispatch", "Not A Valid Name", "--prompt", "hello"]).fails().stderr_has("error");
}

#[test]
fn dry_run_requires_a_prompt_or_an_issue() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project.oj().args(["dispatch", "sprite-1"]).fails().stderr_has("neither prompt nor issue");
}

#[test]
fn prompt_and_issue_are_mutually_exclusive() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project
        .oj()
        .args(["dispatch", "sprite-1", "--prompt", "hi", "--issue", "7"])
        .fails()
        .stderr_has("cannot be used with");
}
