// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`GithubTicketClient`]: a [`TicketClient`] backed by the GitHub REST
//! API (spec §6, external interfaces). Resolves an [`IssueRef`] to the
//! issue's title, body, and HTML URL.

use async_trait::async_trait;
use oj_core::IssueRef;
use serde::Deserialize;

use crate::error::AdapterError;
use crate::ticket::{IssueDetails, TicketClient};

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GithubIssue {
    title: String,
    #[serde(default)]
    body: Option<String>,
    html_url: String,
}

pub struct GithubTicketClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl GithubTicketClient {
    pub fn new(token: Option<String>) -> Result<Self, AdapterError> {
        let http = reqwest::Client::builder()
            .user_agent("oj-dispatch/0.2")
            .build()
            .map_err(|e| AdapterError::Ticket(e.to_string()))?;
        Ok(Self { http, token })
    }
}

#[async_trait]
impl TicketClient for GithubTicketClient {
    async fn fetch_issue(&self, issue: &IssueRef) -> Result<IssueDetails, AdapterError> {
        let slug = issue
            .repo
            .as_deref()
            .ok_or_else(|| AdapterError::Ticket("issue reference has no repo slug".to_string()))?;
        let url = format!("{GITHUB_API_BASE}/repos/{slug}/issues/{}", issue.number);

        let mut request = self.http.get(&url).header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| AdapterError::Ticket(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AdapterError::Ticket(format!("GET {url} returned {}", response.status())));
        }

        let issue: GithubIssue = response.json().await.map_err(|e| AdapterError::Ticket(e.to_string()))?;
        Ok(IssueDetails { title: issue.title, body: issue.body.unwrap_or_default(), url: issue.html_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_a_token() {
        assert!(GithubTicketClient::new(None).is_ok());
    }

    #[test]
    fn builds_with_a_token() {
        assert!(GithubTicketClient::new(Some("ghp_fake".to_string())).is_ok());
    }
}
