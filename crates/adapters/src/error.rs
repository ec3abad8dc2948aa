// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("remote exec on {sprite} failed: {message}")]
    Exec { sprite: String, message: String },

    #[error("remote exec on {sprite} timed out after {timeout_secs}s")]
    ExecTimeout { sprite: String, timeout_secs: u64 },

    #[error("upload to {sprite}:{remote_path} failed: {message}")]
    Upload { sprite: String, remote_path: String, message: String },

    #[error("connectivity probe to {0} failed: {1}")]
    Connectivity(String, String),

    #[error("provisioning sprite {0} failed: {1}")]
    Provisioning(String, String),

    #[error("deprovisioning sprite {0} failed: {1}")]
    Deprovisioning(String, String),

    #[error("ticket lookup failed: {0}")]
    Ticket(String),

    #[error("event log I/O error: {0}")]
    EventLogIo(#[from] io::Error),
}
