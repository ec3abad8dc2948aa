// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Shared-Lock Protocol (spec §4.3/§5, C3).
//!
//! Workers and the CLI contend for the same registry file across
//! separate processes, so exclusion is advisory `flock(2)` via
//! [`fs2`], not an in-process mutex. Callers poll for the lock rather
//! than blocking indefinitely, checking a cancellation predicate
//! between attempts so a cancelled context (Ctrl-C, a request
//! deadline) unblocks promptly instead of waiting out the full
//! timeout.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::StorageError;
use crate::model::Registry;
use crate::{io, registry::WorkerRegistry};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Acquire an exclusive lock on `lock_path` (creating it if absent),
/// run `f` while holding it, then release. Polls every
/// `DEFAULT_POLL_INTERVAL` up to `DEFAULT_TIMEOUT`, checking
/// `is_cancelled` between attempts.
pub fn with_lock<R>(
    lock_path: &Path,
    is_cancelled: impl Fn() -> bool,
    f: impl FnOnce() -> Result<R, StorageError>,
) -> Result<R, StorageError> {
    with_lock_timeout(lock_path, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, is_cancelled, f)
}

pub fn with_lock_timeout<R>(
    lock_path: &Path,
    poll_interval: Duration,
    timeout: Duration,
    is_cancelled: impl Fn() -> bool,
    f: impl FnOnce() -> Result<R, StorageError>,
) -> Result<R, StorageError> {
    let file = open_lock_file(lock_path)?;
    let deadline = Instant::now() + timeout;

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => break,
            Err(_) => {
                if is_cancelled() {
                    return Err(StorageError::Cancelled(lock_path.to_path_buf()));
                }
                if Instant::now() >= deadline {
                    return Err(StorageError::LockTimeout(lock_path.to_path_buf()));
                }
                std::thread::sleep(poll_interval);
            }
        }
    }

    let result = f();
    let _ = FileExt::unlock(&file);
    result
}

fn open_lock_file(path: &Path) -> Result<File, StorageError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })
}

/// Load the registry under lock, hand it to `f`, save it back if `f`
/// returns `Ok`, all before releasing the lock — so a concurrent
/// reader never observes a registry mid-mutation.
pub fn with_locked_registry<R>(
    registry_path: &Path,
    is_cancelled: impl Fn() -> bool,
    f: impl FnOnce(&mut Registry) -> Result<R, StorageError>,
) -> Result<R, StorageError> {
    with_lock(registry_path, is_cancelled, || {
        let mut registry = io::load(registry_path)?;
        let result = f(&mut registry)?;
        io::save(registry_path, &registry)?;
        Ok(result)
    })
}

/// Convenience wrapper returning a [`WorkerRegistry`] handle already
/// loaded under lock, for callers that want the richer query API
/// rather than raw [`Registry`] mutation.
pub fn with_locked_worker_registry<R>(
    registry_path: &Path,
    is_cancelled: impl Fn() -> bool,
    f: impl FnOnce(&mut WorkerRegistry) -> Result<R, StorageError>,
) -> Result<R, StorageError> {
    with_lock(registry_path, is_cancelled, || {
        let mut handle = WorkerRegistry::load(registry_path)?;
        let result = f(&mut handle)?;
        handle.save()?;
        Ok(result)
    })
}
