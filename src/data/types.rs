//! Core data types for the security panel.
//!
//! Sensors are value-equal on `(name, kind)`: two sensors with the same name
//! and kind are the same entity regardless of their activation flag.

use serde::{Deserialize, Serialize};

/// The physical kind of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Door,
    Window,
    Motion,
}

impl SensorKind {
    /// Human-readable label for display.
    pub fn description(&self) -> &'static str {
        match self {
            SensorKind::Door => "Door",
            SensorKind::Window => "Window",
            SensorKind::Motion => "Motion",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A binary sensor: a named device of one kind reporting active/inactive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Operator-assigned name
    pub name: String,
    /// Physical kind of the device
    pub kind: SensorKind,
    /// Whether the sensor currently reports activation
    pub active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor.
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            active: false,
        }
    }

    /// Check whether another sensor refers to the same device.
    pub fn same_device(&self, other: &Sensor) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

// Identity is (name, kind); the activation flag is mutable state, not identity.
impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.same_device(other)
    }
}

impl Eq for Sensor {}

impl std::hash::Hash for Sensor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
    }
}

/// Operator-selected panel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    /// Human-readable label for display.
    pub fn description(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "Disarmed",
            ArmingStatus::ArmedHome => "Armed - At Home",
            ArmingStatus::ArmedAway => "Armed - Away",
        }
    }

    /// Whether the panel is armed in any mode.
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }
}

impl std::fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Derived security state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Human-readable label for display.
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "All clear",
            AlarmStatus::PendingAlarm => "Pending alarm",
            AlarmStatus::Alarm => "ALARM",
        }
    }
}

impl std::fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
