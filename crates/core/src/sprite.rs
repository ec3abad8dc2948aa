// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sprite (worker) and machine identifiers.
//!
//! Construction is intentionally infallible here — shape validation
//! (`^[a-z][a-z0-9-]*$`) lives in `oj-validators` so that this crate stays
//! free of a regex dependency and so every collaborator shares one
//! validation site.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Human-readable worker name, e.g. `bramble`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteName(pub String);

impl SpriteName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpriteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SpriteName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpriteName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for SpriteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier assigned to a worker's underlying machine by the
/// external provisioner. The dispatch system never parses this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(pub String);

impl MachineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MachineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrips_string() {
        let name = SpriteName::new("bramble");
        assert_eq!(name.to_string(), "bramble");
        assert_eq!(name.as_str(), "bramble");
    }
}
