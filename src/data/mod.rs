//! Panel data model and persistence.
//!
//! This module holds the sensor and status types, the [`SecurityStore`]
//! persistence port, and the two shipped store implementations (in-memory
//! and JSON-file-backed).

pub mod file;
pub mod memory;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use file::FileStore;
pub use memory::{MemoryStore, PanelState};
pub use store::{SecurityStore, StoreError};
pub use types::{AlarmStatus, ArmingStatus, Sensor, SensorKind};
