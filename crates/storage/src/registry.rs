// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Worker Registry handle (spec §4.3, C3): a loaded [`Registry`]
//! bound to the file path it came from, with the mutating operations
//! the rest of the system needs. Not locked itself — callers that need
//! cross-process exclusion go through [`crate::lock`].

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::StorageError;
use crate::io;
use crate::model::{Registry, SpriteEntry};

pub struct WorkerRegistry {
    path: PathBuf,
    registry: Registry,
}

impl WorkerRegistry {
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let registry = io::load(path)?;
        Ok(Self { path: path.to_path_buf(), registry })
    }

    pub fn save(&self) -> Result<(), StorageError> {
        io::save(&self.path, &self.registry)
    }

    pub fn names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn lookup_machine(&self, machine_id: &str) -> Option<(&str, &SpriteEntry)> {
        self.registry.lookup_machine(machine_id)
    }

    pub fn lookup_name(&self, name: &str) -> Option<&SpriteEntry> {
        self.registry.lookup_name(name)
    }

    /// Insert a new sprite entry, or update `machine_id` on an existing
    /// one in place, preserving its `created_at` and any assignment.
    pub fn register(&mut self, name: impl Into<String>, machine_id: impl Into<String>) -> Result<(), StorageError> {
        let name = name.into();
        match self.registry.sprites.get_mut(&name) {
            Some(entry) => entry.machine_id = machine_id.into(),
            None => {
                self.registry.sprites.insert(name, SpriteEntry::new(machine_id, Utc::now()));
            }
        }
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Result<SpriteEntry, StorageError> {
        self.registry
            .sprites
            .remove(name)
            .ok_or_else(|| StorageError::NotRegistered(name.to_string()))
    }

    /// Record an issue/repo assignment against an existing sprite,
    /// leaving any prior assignment it had overwritten (preserve-on-update).
    pub fn assign(&mut self, name: &str, issue: impl Into<String>, repo: impl Into<String>) -> Result<(), StorageError> {
        let entry = self
            .registry
            .sprites
            .get_mut(name)
            .ok_or_else(|| StorageError::NotRegistered(name.to_string()))?;
        entry.assigned_issue = Some(issue.into());
        entry.assigned_repo = Some(repo.into());
        entry.assigned_at = Some(Utc::now());
        Ok(())
    }

    pub fn clear_assignment(&mut self, name: &str) -> Result<(), StorageError> {
        let entry = self
            .registry
            .sprites
            .get_mut(name)
            .ok_or_else(|| StorageError::NotRegistered(name.to_string()))?;
        entry.clear_assignment();
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let mut reg = WorkerRegistry::load(&path).unwrap();
        reg.register("alpha", "m-1").unwrap();
        reg.save().unwrap();

        let reloaded = WorkerRegistry::load(&path).unwrap();
        assert_eq!(reloaded.lookup_name("alpha").unwrap().machine_id, "m-1");
        assert_eq!(reloaded.lookup_machine("m-1").unwrap().0, "alpha");
    }

    #[test]
    fn registering_twice_updates_machine_id_and_keeps_created_at() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let mut reg = WorkerRegistry::load(&path).unwrap();
        reg.register("alpha", "m-1").unwrap();
        let created_at = reg.lookup_name("alpha").unwrap().created_at;

        reg.register("alpha", "m-2").unwrap();
        let entry = reg.lookup_name("alpha").unwrap();
        assert_eq!(entry.machine_id, "m-2");
        assert_eq!(entry.created_at, created_at);
    }

    #[test]
    fn unregister_removes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let mut reg = WorkerRegistry::load(&path).unwrap();
        reg.register("alpha", "m-1").unwrap();
        let removed = reg.unregister("alpha").unwrap();
        assert_eq!(removed.machine_id, "m-1");
        assert!(reg.lookup_name("alpha").is_none());
    }

    #[test]
    fn assign_preserves_other_fields_on_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let mut reg = WorkerRegistry::load(&path).unwrap();
        reg.register("alpha", "m-1").unwrap();
        reg.assign("alpha", "issue-1", "acme/widgets").unwrap();
        let entry = reg.lookup_name("alpha").unwrap();
        assert_eq!(entry.machine_id, "m-1");
        assert_eq!(entry.assigned_issue.as_deref(), Some("issue-1"));
    }
}
