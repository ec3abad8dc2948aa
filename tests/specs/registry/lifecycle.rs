// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj registry` specs: init/list/show/register against a scratch file,
//! no Kubernetes or GitHub connection required.

use crate::prelude::*;

#[test]
fn init_creates_an_empty_registry() {
    let project = Project::empty();

    project.oj().args(["registry", "init"]).passes().stdout_has("registry initialized");

    assert!(project.registry_path().exists());
    project.oj().args(["registry", "list"]).passes().stdout_eq("");
}

#[test]
fn register_then_list_shows_the_sprite() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project
        .oj()
        .args(["registry", "register", "sprite-1", "machine-a"])
        .passes()
        .stdout_has("registered sprite-1 -> machine-a");

    project.oj().args(["registry", "list"]).passes().stdout_has("sprite-1");
}

#[test]
fn register_twice_updates_the_machine_id() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();
    project.oj().args(["registry", "register", "sprite-1", "machine-a"]).passes();

    project
        .oj()
        .args(["registry", "register", "sprite-1", "machine-b"])
        .passes()
        .stdout_has("registered sprite-1 -> machine-b");

    project
        .oj()
        .args(["registry", "show", "sprite-1"])
        .passes()
        .stdout_has("machine-b");
}

#[test]
fn show_prints_the_registered_machine_id() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();
    project.oj().args(["registry", "register", "sprite-1", "machine-a"]).passes();

    project
        .oj()
        .args(["registry", "show", "sprite-1"])
        .passes()
        .stdout_has("sprite-1")
        .stdout_has("machine-a");
}

#[test]
fn show_unknown_sprite_fails() {
    let project = Project::empty();
    project.oj().args(["registry", "init"]).passes();

    project.oj().args(["registry", "show", "nope"]).fails().stderr_has("not found");
}
