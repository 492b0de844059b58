//! In-memory store implementation.
//!
//! Holds panel state for the lifetime of the process. Used directly in tests
//! and as the working image behind the file-backed store.

use crate::data::store::{SecurityStore, StoreError};
use crate::data::types::{AlarmStatus, ArmingStatus, Sensor};
use serde::{Deserialize, Serialize};

/// The full persistable panel state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelState {
    pub sensors: Vec<Sensor>,
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            sensors: Vec::new(),
            arming_status: ArmingStatus::Disarmed,
            alarm_status: AlarmStatus::NoAlarm,
        }
    }
}

/// A store keeping all panel state in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: PanelState,
}

impl MemoryStore {
    /// Create an empty store: no sensors, disarmed, no alarm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from previously captured state.
    pub fn from_state(state: PanelState) -> Self {
        Self { state }
    }

    /// Borrow the current state (for persistence layers wrapping this store).
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    fn position_of(&self, sensor: &Sensor) -> Option<usize> {
        self.state.sensors.iter().position(|s| s == sensor)
    }
}

impl SecurityStore for MemoryStore {
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.state.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        if self.position_of(&sensor).is_none() {
            self.state.sensors.push(sensor);
        }
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        match self.position_of(sensor) {
            Some(idx) => {
                self.state.sensors.remove(idx);
                Ok(())
            }
            None => Err(StoreError::UnknownSensor(sensor.name.clone())),
        }
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        match self.position_of(sensor) {
            Some(idx) => {
                self.state.sensors[idx].active = sensor.active;
                Ok(())
            }
            None => Err(StoreError::UnknownSensor(sensor.name.clone())),
        }
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.state.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.state.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.state.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.state.alarm_status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::SensorKind;

    #[test]
    fn test_empty_store_defaults() {
        let store = MemoryStore::new();
        assert!(store.sensors().unwrap().is_empty());
        assert_eq!(store.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert_eq!(store.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn test_add_is_idempotent_per_device() {
        let mut store = MemoryStore::new();
        store
            .add_sensor(Sensor::new("porch", SensorKind::Door))
            .unwrap();
        store
            .add_sensor(Sensor::new("porch", SensorKind::Door))
            .unwrap();

        assert_eq!(store.sensors().unwrap().len(), 1);
    }

    #[test]
    fn test_update_persists_activation_flag() {
        let mut store = MemoryStore::new();
        let mut sensor = Sensor::new("porch", SensorKind::Door);
        store.add_sensor(sensor.clone()).unwrap();

        sensor.active = true;
        store.update_sensor(&sensor).unwrap();

        assert!(store.sensors().unwrap()[0].active);
    }

    #[test]
    fn test_remove_unknown_sensor_fails() {
        let mut store = MemoryStore::new();
        let sensor = Sensor::new("ghost", SensorKind::Motion);

        let err = store.remove_sensor(&sensor).unwrap_err();
        assert!(matches!(err, StoreError::UnknownSensor(_)));
    }

    #[test]
    fn test_update_unknown_sensor_fails() {
        let mut store = MemoryStore::new();
        let sensor = Sensor::new("ghost", SensorKind::Motion);

        let err = store.update_sensor(&sensor).unwrap_err();
        assert!(matches!(err, StoreError::UnknownSensor(_)));
    }
}
