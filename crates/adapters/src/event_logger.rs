// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `EventLogger`: records [`DispatchEvent`]s as the orchestrator and
//! watchdog emit them (spec §3/§6).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use oj_core::DispatchEvent;
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AdapterError;

/// One durable log line: the event plus the id/timestamp the logger
/// stamps on it, since durability (and so identity) is the logger's
/// responsibility, not C7's (spec §3).
#[derive(Serialize)]
struct LoggedEvent<'a> {
    id: Uuid,
    logged_at: chrono::DateTime<Utc>,
    #[serde(flatten)]
    event: &'a DispatchEvent,
}

#[async_trait]
pub trait EventLogger: Send + Sync {
    async fn log(&self, event: &DispatchEvent) -> Result<(), AdapterError>;
}

/// Discards every event. The default for CLI invocations that don't
/// want a durable audit trail.
pub struct NoopEventLogger;

#[async_trait]
impl EventLogger for NoopEventLogger {
    async fn log(&self, _event: &DispatchEvent) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// Appends each event as one JSON line to a file, behind a mutex since
/// multiple orchestrator/watchdog tasks may log concurrently.
pub struct FileEventLogger {
    path: PathBuf,
    file: Arc<Mutex<std::fs::File>>,
}

impl FileEventLogger {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AdapterError> {
        let path = path.into();
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file: Arc::new(Mutex::new(file)) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventLogger for FileEventLogger {
    async fn log(&self, event: &DispatchEvent) -> Result<(), AdapterError> {
        let logged = LoggedEvent { id: Uuid::new_v4(), logged_at: Utc::now(), event };
        let line = serde_json::to_string(&logged).map_err(|e| AdapterError::EventLogIo(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        let mut file = self.file.lock();
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn started(sprite: &str) -> DispatchEvent {
        DispatchEvent::DispatchStarted { sprite: sprite.to_string(), execute: false }
    }

    #[tokio::test]
    async fn noop_logger_accepts_anything() {
        let logger = NoopEventLogger;
        logger.log(&started("sprite-1")).await.unwrap();
    }

    #[tokio::test]
    async fn file_logger_appends_one_json_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = FileEventLogger::open(&path).unwrap();

        logger.log(&started("sprite-1")).await.unwrap();
        logger.log(&started("sprite-2")).await.unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
