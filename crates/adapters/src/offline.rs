// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters that refuse every call (spec §6). Used where a caller needs
//! a type that satisfies [`RemoteClient`]/[`Provisioner`] to build an
//! [`crate::TicketClient`]-only pipeline — a dry-run plan never invokes
//! the remote or provisioner, so there is no reason to pay for a live
//! connection just to type-check one.

use std::time::Duration;

use async_trait::async_trait;
use oj_core::MachineId;

use crate::error::AdapterError;
use crate::provisioner::Provisioner;
use crate::remote::{ExecOutput, RemoteClient};

pub struct UnavailableRemoteClient;

#[async_trait]
impl RemoteClient for UnavailableRemoteClient {
    async fn exec(&self, sprite: &str, _script: &str, _timeout: Duration) -> Result<ExecOutput, AdapterError> {
        Err(AdapterError::Exec { sprite: sprite.to_string(), message: "no remote connection configured for a dry run".to_string() })
    }

    async fn exec_with_env(
        &self,
        sprite: &str,
        _script: &str,
        _env: &[(String, String)],
        _timeout: Duration,
    ) -> Result<ExecOutput, AdapterError> {
        Err(AdapterError::Exec { sprite: sprite.to_string(), message: "no remote connection configured for a dry run".to_string() })
    }

    async fn upload(&self, sprite: &str, remote_path: &str, _contents: &[u8]) -> Result<(), AdapterError> {
        Err(AdapterError::Upload { sprite: sprite.to_string(), remote_path: remote_path.to_string(), message: "no remote connection configured for a dry run".to_string() })
    }

    async fn list(&self, sprite: &str, _remote_dir: &str) -> Result<Vec<String>, AdapterError> {
        Err(AdapterError::Exec { sprite: sprite.to_string(), message: "no remote connection configured for a dry run".to_string() })
    }

    async fn list_fleet(&self) -> Result<Vec<String>, AdapterError> {
        Err(AdapterError::Exec { sprite: "*".to_string(), message: "no remote connection configured for a dry run".to_string() })
    }

    async fn probe_connectivity(&self, sprite: &str) -> Result<bool, AdapterError> {
        Err(AdapterError::Connectivity(sprite.to_string(), "no remote connection configured for a dry run".to_string()))
    }
}

pub struct UnavailableProvisioner;

#[async_trait]
impl Provisioner for UnavailableProvisioner {
    async fn provision(&self, sprite: &str) -> Result<MachineId, AdapterError> {
        Err(AdapterError::Provisioning(sprite.to_string(), "no provisioner configured for a dry run".to_string()))
    }

    async fn deprovision(&self, sprite: &str) -> Result<(), AdapterError> {
        Err(AdapterError::Deprovisioning(sprite.to_string(), "no provisioner configured for a dry run".to_string()))
    }

    async fn is_alive(&self, machine_id: &MachineId) -> Result<bool, AdapterError> {
        Err(AdapterError::Provisioning(machine_id.as_str().to_string(), "no provisioner configured for a dry run".to_string()))
    }
}
