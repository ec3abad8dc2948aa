// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic load/save of the registry file (spec §4.3, C3).
//!
//! Writes go to a sibling temp file, are fsync'd, chmod'd to `0600`,
//! then renamed over the destination — the rename is atomic on a
//! POSIX filesystem, so a crash mid-write never leaves a torn file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::StorageError;
use crate::model::Registry;

pub fn load(path: &Path) -> Result<Registry, StorageError> {
    if !path.exists() {
        return Ok(Registry::new());
    }
    let contents = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save(path: &Path, registry: &Registry) -> Result<(), StorageError> {
    let serialized = toml::to_string_pretty(registry)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp_dir = dir.unwrap_or_else(|| Path::new("."));
    let tmp_path = tmp_dir.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("registry")
    ));

    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = dir {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(io_err)?;
            set_dir_permissions(dir).map_err(io_err)?;
        }
    }

    {
        let mut file = File::create(&tmp_path).map_err(io_err)?;
        file.write_all(serialized.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        set_owner_only_permissions(&file).map_err(io_err)?;
    }

    fs::rename(&tmp_path, path).map_err(io_err)?;
    Ok(())
}

#[cfg(unix)]
fn set_owner_only_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_owner_only_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_dir_permissions(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpriteEntry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_file_loads_as_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let reg = load(&path).unwrap();
        assert!(reg.sprites.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");

        let mut reg = Registry::new();
        reg.sprites.insert(
            "alpha".to_string(),
            SpriteEntry::new("m-1", Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        );
        save(&path, &reg).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.sprites.get("alpha").unwrap().machine_id, "m-1");
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        save(&path, &Registry::new()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("registry.toml");
        save(&path, &Registry::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_does_not_leave_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        save(&path, &Registry::new()).unwrap();
        assert!(!dir.path().join(".registry.toml.tmp").exists());
    }
}
