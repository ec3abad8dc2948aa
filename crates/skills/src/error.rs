// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill path {0} does not exist or is not readable: {1}")]
    Unreadable(PathBuf, #[source] io::Error),

    #[error("skill bundle name {0:?} is invalid; expected ^[a-z][a-z0-9-]*$")]
    InvalidName(String),

    #[error("{0} is a symlink; skill bundles may not contain symlinks")]
    Symlink(PathBuf),

    #[error("{0} is not a regular file")]
    NotRegularFile(PathBuf),

    #[error("file {path} is {size} bytes, exceeding the {limit}-byte per-file limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("bundle {name:?} has {count} files, exceeding the {limit}-file limit")]
    TooManyFiles { name: String, count: usize, limit: usize },

    #[error("bundle {name:?} totals {size} bytes, exceeding the {limit}-byte limit")]
    BundleTooLarge { name: String, size: u64, limit: u64 },

    #[error("dispatch requests {0} skill mounts, exceeding the {1}-mount limit")]
    TooManyMounts(usize, usize),

    #[error("duplicate skill name {0:?} across mounts")]
    DuplicateName(String),
}
