//! The persistence port for panel state.
//!
//! The store is authoritative: the state machine re-reads arming status,
//! alarm status, and the sensor set through this trait before deciding any
//! transition.

use crate::data::types::{AlarmStatus, ArmingStatus, Sensor};

/// Errors raised by a store implementation.
#[derive(Debug)]
pub enum StoreError {
    /// The named sensor is not registered with the panel
    UnknownSensor(String),
    /// Underlying I/O failed
    IoError(String),
    /// Stored state could not be parsed
    ParseError(String),
    /// State could not be serialized for persistence
    SerializeError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::UnknownSensor(name) => write!(f, "Unknown sensor: {name}"),
            StoreError::IoError(e) => write!(f, "IO error: {e}"),
            StoreError::ParseError(e) => write!(f, "Parse error: {e}"),
            StoreError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// CRUD over sensors plus read/write of the two panel-wide status values.
pub trait SecurityStore {
    /// All sensors known to the panel.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    /// Register a sensor. Adding a sensor that is already registered
    /// (same name and kind) is a no-op.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    /// Remove a registered sensor. Fails with `UnknownSensor` if no sensor
    /// with the same name and kind exists.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Persist a sensor's current activation flag. Fails with
    /// `UnknownSensor` if the sensor is not registered.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Current arming status.
    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    /// Persist a new arming status.
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;

    /// Current alarm status.
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    /// Persist a new alarm status.
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;
}
