// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The on-disk registry schema (spec §4.3, C3).
//!
//! Deserialization is narrow: unrecognized tables and keys are ignored
//! rather than rejected, so a newer registry file can still be read by
//! an older binary and a round-trip through this binary never drops a
//! foreign key it doesn't understand first — it drops it either way,
//! but only ever the keys this schema doesn't declare.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMeta {
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

impl Default for RegistryMeta {
    fn default() -> Self {
        Self { version: CURRENT_VERSION }
    }
}

/// One registered worker machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub machine_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assigned_issue: Option<String>,
    #[serde(default)]
    pub assigned_repo: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl SpriteEntry {
    pub fn new(machine_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            machine_id: machine_id.into(),
            created_at,
            assigned_issue: None,
            assigned_repo: None,
            assigned_at: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_issue.is_some()
    }

    pub fn clear_assignment(&mut self) {
        self.assigned_issue = None;
        self.assigned_repo = None;
        self.assigned_at = None;
    }
}

/// A `BTreeMap` keeps sprite names in sorted order for free, so
/// enumeration and lookups never need an explicit sort step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub meta: RegistryMeta,
    #[serde(default)]
    pub sprites: BTreeMap<String, SpriteEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.sprites.keys().map(String::as_str).collect()
    }

    /// Find the (name, entry) pair for a given `machine_id`. Iteration
    /// is over the sorted `BTreeMap`, so ties (which should not occur
    /// in practice) resolve deterministically to the lexicographically
    /// first name.
    pub fn lookup_machine(&self, machine_id: &str) -> Option<(&str, &SpriteEntry)> {
        self.sprites
            .iter()
            .find(|(_, entry)| entry.machine_id == machine_id)
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn lookup_name(&self, name: &str) -> Option<&SpriteEntry> {
        self.sprites.get(name)
    }
}
