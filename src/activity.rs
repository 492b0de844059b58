//! Panel activity log.
//!
//! Tracks and exposes counters about panel activity for the `status` command
//! and the HTTP status endpoint. Implements [`StatusListener`] so it can be
//! registered directly on the panel.

use crate::data::AlarmStatus;
use crate::panel::StatusListener;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Activity counters for the current session.
#[derive(Debug)]
pub struct ActivityLog {
    /// Number of sensor add/remove/activation changes observed
    sensor_events: AtomicU64,
    /// Number of alarm-status transitions observed
    alarm_transitions: AtomicU64,
    /// Number of camera frames classified
    images_processed: AtomicU64,
    /// Number of frames classified as containing an intruder
    intruder_detections: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting counters
    persist_path: Option<PathBuf>,
}

impl ActivityLog {
    /// Create a new activity log.
    pub fn new() -> Self {
        Self {
            sensor_events: AtomicU64::new(0),
            alarm_transitions: AtomicU64::new(0),
            images_processed: AtomicU64::new(0),
            intruder_detections: AtomicU64::new(0),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create an activity log with persistence.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            eprintln!("Note: Could not load previous activity stats: {e}");
        }

        log
    }

    /// Get the current statistics.
    pub fn stats(&self) -> ActivityStats {
        ActivityStats {
            sensor_events: self.sensor_events.load(Ordering::Relaxed),
            alarm_transitions: self.alarm_transitions.load(Ordering::Relaxed),
            images_processed: self.images_processed.load(Ordering::Relaxed),
            intruder_detections: self.intruder_detections.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds() as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Sensor events observed: {}\n\
             - Alarm transitions: {}\n\
             - Images processed: {}\n\
             - Intruder detections: {}\n\
             - Session duration: {} seconds",
            stats.sensor_events,
            stats.alarm_transitions,
            stats.images_processed,
            stats.intruder_detections,
            stats.session_duration_secs
        )
    }

    /// Save counters to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let stats = self.stats();
            let persisted = PersistedStats {
                sensor_events: stats.sensor_events,
                alarm_transitions: stats.alarm_transitions,
                images_processed: stats.images_processed,
                intruder_detections: stats.intruder_detections,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string_pretty(&persisted).map_err(std::io::Error::other)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Load counters from disk.
    fn load(&mut self) -> Result<(), std::io::Error> {
        if let Some(ref path) = self.persist_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let persisted: PersistedStats =
                    serde_json::from_str(&content).map_err(std::io::Error::other)?;

                self.sensor_events
                    .store(persisted.sensor_events, Ordering::Relaxed);
                self.alarm_transitions
                    .store(persisted.alarm_transitions, Ordering::Relaxed);
                self.images_processed
                    .store(persisted.images_processed, Ordering::Relaxed);
                self.intruder_detections
                    .store(persisted.intruder_detections, Ordering::Relaxed);
            }
        }
        Ok(())
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.sensor_events.store(0, Ordering::Relaxed);
        self.alarm_transitions.store(0, Ordering::Relaxed);
        self.images_processed.store(0, Ordering::Relaxed);
        self.intruder_detections.store(0, Ordering::Relaxed);
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusListener for ActivityLog {
    fn on_alarm_status_changed(&self, _status: AlarmStatus) {
        self.alarm_transitions.fetch_add(1, Ordering::Relaxed);
    }

    fn on_sensor_status_changed(&self) {
        self.sensor_events.fetch_add(1, Ordering::Relaxed);
    }

    fn on_intruder_result(&self, detected: bool) {
        self.images_processed.fetch_add(1, Ordering::Relaxed);
        if detected {
            self.intruder_detections.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Snapshot of activity statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStats {
    pub sensor_events: u64,
    pub alarm_transitions: u64,
    pub images_processed: u64,
    pub intruder_detections: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Counter format for persistence.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedStats {
    sensor_events: u64,
    alarm_transitions: u64,
    images_processed: u64,
    intruder_detections: u64,
    last_updated: DateTime<Utc>,
}

/// Thread-safe shared activity log.
pub type SharedActivityLog = Arc<ActivityLog>;

/// Create a new shared activity log.
pub fn create_shared_log() -> SharedActivityLog {
    Arc::new(ActivityLog::new())
}

/// Create a new shared activity log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedActivityLog {
    Arc::new(ActivityLog::with_persistence(path))
}
