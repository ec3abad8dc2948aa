// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `TicketClient`: resolves an [`oj_core::IssueRef`] into prompt text
//! (spec §6, external interfaces). One implementation per tracker;
//! the engine only needs title + body to render a prompt.

use async_trait::async_trait;
use oj_core::IssueRef;

use crate::error::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetails {
    pub title: String,
    pub body: String,
    pub url: String,
}

#[async_trait]
pub trait TicketClient: Send + Sync {
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueDetails, AdapterError>;
}
