// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for CLI specs: a thin wrapper around [`assert_cmd`] plus
//! a scratch [`Project`] directory each test gets its own registry file in.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::assert::Assert;
use assert_cmd::Command;

/// A fresh `oj` invocation with no args yet.
pub fn cli() -> Command {
    Command::cargo_bin("oj").expect("oj binary should build")
}

pub trait CommandExt {
    fn passes(self) -> Assert;
    fn fails(self) -> Assert;
}

impl CommandExt for &mut Command {
    fn passes(self) -> Assert {
        self.assert().success()
    }

    fn fails(self) -> Assert {
        self.assert().failure()
    }
}

pub trait AssertExt {
    fn stdout_has(self, needle: &str) -> Self;
    fn stderr_has(self, needle: &str) -> Self;
    fn stdout_eq(self, expected: &str) -> Self;
    fn stdout(&self) -> String;
}

impl AssertExt for Assert {
    fn stdout_has(self, needle: &str) -> Self {
        let out = String::from_utf8_lossy(&self.get_output().stdout).into_owned();
        assert!(out.contains(needle), "expected stdout to contain {needle:?}, got:\n{out}");
        self
    }

    fn stderr_has(self, needle: &str) -> Self {
        let out = String::from_utf8_lossy(&self.get_output().stderr).into_owned();
        assert!(out.contains(needle), "expected stderr to contain {needle:?}, got:\n{out}");
        self
    }

    fn stdout_eq(self, expected: &str) -> Self {
        let out = String::from_utf8_lossy(&self.get_output().stdout).into_owned();
        assert_eq!(out, expected);
        self
    }

    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.get_output().stdout).into_owned()
    }
}

/// A scratch directory holding one test's registry file. Each `oj()`
/// invocation points `--registry` at a file inside it, so tests never
/// touch the operator's real registry.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn registry_path(&self) -> PathBuf {
        self.dir.path().join("registry.toml")
    }

    pub fn file(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    /// An `oj` invocation scoped to this project's registry. Dispatch's
    /// direct-key check reads the value observed on the worker, not this
    /// process's environment, but clear it here anyway to keep specs
    /// deterministic regardless of the operator's own shell.
    pub fn oj(&self) -> Command {
        let mut command = cli();
        command.arg("--registry").arg(self.registry_path());
        command.env_remove("ANTHROPIC_API_KEY");
        command
    }
}
