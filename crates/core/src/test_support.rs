// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::prepared::{PreparedRequest, ProvisioningMeta, SpritePaths};
use crate::request::DispatchRequest;

/// A minimal, fully-resolved `PreparedRequest` for tests that don't care
/// about repo/skill resolution details.
pub fn sample_prepared_request(sprite: &str) -> PreparedRequest {
    PreparedRequest {
        request: DispatchRequest::new(sprite, "Fix flaky auth tests"),
        repo: None,
        skills: Vec::new(),
        prompt: "Fix flaky auth tests".to_string(),
        start_command: "claude -p".to_string(),
        task_label: "Fix flaky auth tests".to_string(),
        paths: SpritePaths::default_for(sprite),
        provisioning: ProvisioningMeta::default(),
    }
}
