// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! oj-adapters: the boundary traits between the engine and everything
//! outside the process — the worker transport, its backing compute,
//! the issue tracker, and the event log (spec §6, external interfaces).

pub mod error;
pub mod event_logger;
pub mod github_ticket;
pub mod kube_remote;
pub mod offline;
pub mod provisioner;
pub mod remote;
pub mod ticket;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::AdapterError;
pub use event_logger::{EventLogger, FileEventLogger, NoopEventLogger};
pub use github_ticket::GithubTicketClient;
pub use kube_remote::KubeRemoteClient;
pub use offline::{UnavailableProvisioner, UnavailableRemoteClient};
pub use provisioner::{default_pod_template, KubeProvisioner, Provisioner};
pub use remote::{ExecOutput, RemoteClient};
pub use ticket::{IssueDetails, TicketClient};

#[cfg(any(test, feature = "test-support"))]
pub use test_support::{FakeProvisioner, FakeRemoteClient, FakeTicketClient, RecordingEventLogger};
