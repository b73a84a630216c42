//! Schedule document loader
//!
//! Reads `schedule_<parity>.json` from the configured data directory. Every
//! failure is logged and turned into `None`; nothing here is fatal to the
//! server.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use super::error::ScheduleError;
use super::parity::WeekParity;
use crate::logger;

/// Read-only view over the directory holding the schedule documents
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    data_dir: PathBuf,
}

impl ScheduleStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Location of the document backing `parity`
    pub fn path_for(&self, parity: WeekParity) -> PathBuf {
        self.data_dir.join(parity.file_name())
    }

    /// Load the document for a raw parity string
    ///
    /// Unknown parities are rejected before any path is built.
    pub async fn load(&self, parity: &str) -> Option<Value> {
        match parity.parse::<WeekParity>() {
            Ok(parity) => self.load_parity(parity).await,
            Err(e) => {
                logger::log_warning(&e.to_string());
                None
            }
        }
    }

    /// Load the document for `parity`, logging the cause on failure
    pub async fn load_parity(&self, parity: WeekParity) -> Option<Value> {
        match self.try_load(parity).await {
            Ok(document) => Some(document),
            Err(e @ ScheduleError::NotFound(_)) => {
                logger::log_warning(&e.to_string());
                None
            }
            Err(e) => {
                logger::log_error(&e.to_string());
                None
            }
        }
    }

    /// Load the document for `parity`, returning the failure cause
    pub async fn try_load(&self, parity: WeekParity) -> Result<Value, ScheduleError> {
        let path = self.path_for(parity);

        let content = match fs::read(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScheduleError::NotFound(path));
            }
            Err(source) => return Err(ScheduleError::Io { path, source }),
        };

        logger::log_debug(&format!(
            "Loaded {} ({} bytes)",
            path.display(),
            content.len()
        ));

        serde_json::from_slice(&content).map_err(|source| ScheduleError::Parse { path, source })
    }
}
