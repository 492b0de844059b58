//! JSON-file-backed store implementation.
//!
//! Wraps a [`MemoryStore`] working image and writes the full panel state to
//! disk after every mutation, so CLI invocations and restarts see the same
//! panel.

use crate::data::memory::{MemoryStore, PanelState};
use crate::data::store::{SecurityStore, StoreError};
use crate::data::types::{AlarmStatus, ArmingStatus, Sensor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk format: the panel state plus a write timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    #[serde(flatten)]
    state: PanelState,
    last_updated: DateTime<Utc>,
}

/// A store that persists panel state to a JSON file.
#[derive(Debug)]
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Open a file-backed store, loading existing state if the file exists
    /// and starting from defaults otherwise.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::IoError(e.to_string()))?;
            let persisted: PersistedState = serde_json::from_str(&content)
                .map_err(|e| StoreError::ParseError(e.to_string()))?;
            MemoryStore::from_state(persisted.state)
        } else {
            MemoryStore::new()
        };

        Ok(Self { inner, path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let persisted = PersistedState {
            state: self.inner.state().clone(),
            last_updated: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| StoreError::SerializeError(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::IoError(e.to_string()))
    }
}

impl SecurityStore for FileStore {
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        self.inner.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.inner.add_sensor(sensor)?;
        self.persist()
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.inner.remove_sensor(sensor)?;
        self.persist()
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.inner.update_sensor(sensor)?;
        self.persist()
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        self.inner.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.inner.set_arming_status(status)?;
        self.persist()
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.inner.set_alarm_status(status)?;
        self.persist()
    }
}
