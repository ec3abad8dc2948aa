// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for the adapter traits, for use by other crates'
//! tests. Gated behind `#[cfg(feature = "test-support")]`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use oj_core::{IssueRef, MachineId};
use parking_lot::Mutex;

use crate::error::AdapterError;
use crate::event_logger::EventLogger;
use crate::provisioner::Provisioner;
use crate::remote::{ExecOutput, RemoteClient};
use crate::ticket::{IssueDetails, TicketClient};

/// Scripted responses keyed by sprite name, recording every call it
/// received so a test can assert on what was asked of it.
#[derive(Default)]
pub struct FakeRemoteClient {
    pub exec_responses: Mutex<HashMap<String, ExecOutput>>,
    pub exec_calls: Mutex<Vec<(String, String)>>,
    pub uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
    pub connectivity: Mutex<HashMap<String, bool>>,
    pub fleet: Mutex<Vec<String>>,
}

impl FakeRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exec_response(self, sprite: &str, output: ExecOutput) -> Self {
        self.exec_responses.lock().insert(sprite.to_string(), output);
        self
    }

    pub fn with_fleet(self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        *self.fleet.lock() = names.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl RemoteClient for FakeRemoteClient {
    async fn exec(&self, sprite: &str, script: &str, _timeout: Duration) -> Result<ExecOutput, AdapterError> {
        self.exec_calls.lock().push((sprite.to_string(), script.to_string()));
        self.exec_responses
            .lock()
            .get(sprite)
            .cloned()
            .ok_or_else(|| AdapterError::Exec { sprite: sprite.to_string(), message: "no scripted response".to_string() })
    }

    async fn exec_with_env(
        &self,
        sprite: &str,
        script: &str,
        _env: &[(String, String)],
        timeout: Duration,
    ) -> Result<ExecOutput, AdapterError> {
        self.exec(sprite, script, timeout).await
    }

    async fn upload(&self, sprite: &str, remote_path: &str, contents: &[u8]) -> Result<(), AdapterError> {
        self.uploads.lock().push((sprite.to_string(), remote_path.to_string(), contents.to_vec()));
        Ok(())
    }

    async fn list(&self, _sprite: &str, _remote_dir: &str) -> Result<Vec<String>, AdapterError> {
        Ok(Vec::new())
    }

    async fn list_fleet(&self) -> Result<Vec<String>, AdapterError> {
        Ok(self.fleet.lock().clone())
    }

    async fn probe_connectivity(&self, sprite: &str) -> Result<bool, AdapterError> {
        Ok(*self.connectivity.lock().get(sprite).unwrap_or(&true))
    }
}

#[derive(Default)]
pub struct FakeProvisioner {
    pub provisioned: Mutex<Vec<String>>,
}

#[async_trait]
impl Provisioner for FakeProvisioner {
    async fn provision(&self, sprite: &str) -> Result<MachineId, AdapterError> {
        self.provisioned.lock().push(sprite.to_string());
        Ok(MachineId::new(format!("fake-machine-{sprite}")))
    }

    async fn deprovision(&self, sprite: &str) -> Result<(), AdapterError> {
        self.provisioned.lock().retain(|s| s != sprite);
        Ok(())
    }

    async fn is_alive(&self, _machine_id: &MachineId) -> Result<bool, AdapterError> {
        Ok(true)
    }
}

#[derive(Default)]
pub struct FakeTicketClient {
    pub issues: Mutex<HashMap<u64, IssueDetails>>,
}

impl FakeTicketClient {
    pub fn with_issue(self, number: u64, details: IssueDetails) -> Self {
        self.issues.lock().insert(number, details);
        self
    }
}

#[async_trait]
impl TicketClient for FakeTicketClient {
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueDetails, AdapterError> {
        self.issues
            .lock()
            .get(&issue.number)
            .cloned()
            .ok_or_else(|| AdapterError::Ticket(format!("no fake issue #{}", issue.number)))
    }
}

#[derive(Default)]
pub struct RecordingEventLogger {
    pub events: Mutex<Vec<oj_core::DispatchEvent>>,
}

#[async_trait]
impl EventLogger for RecordingEventLogger {
    async fn log(&self, event: &oj_core::DispatchEvent) -> Result<(), AdapterError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}
