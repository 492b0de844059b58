//! Homeguard Panel - Home security monitoring with a sensor-driven alarm
//! state machine.
//!
//! This library models a single security panel: sensors report
//! activation/deactivation, an operator arms/disarms the panel, and camera
//! frames are classified for the presence of an intruder. All decision logic
//! lives in the alarm state machine; storage and image classification are
//! ports behind traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Homeguard Panel                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌──────────────┐   ┌─────────────┐       │
//! │  │ Sensor feed │──▶│ SecurityPanel│◀──│ Classifier  │       │
//! │  │ (simulated) │   │(state machine│   │   (stub)    │       │
//! │  └─────────────┘   └──────┬───────┘   └─────────────┘       │
//! │                           │                                 │
//! │              ┌────────────┼──────────────┐                  │
//! │              ▼            ▼              ▼                  │
//! │       ┌───────────┐ ┌───────────┐ ┌────────────┐            │
//! │       │   Store   │ │ Listeners │ │ Activity   │            │
//! │       │  (JSON)   │ │ (console) │ │    log     │            │
//! │       └───────────┘ └───────────┘ └────────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use homeguard_panel::data::{ArmingStatus, MemoryStore, Sensor, SensorKind};
//! use homeguard_panel::image::FakeClassifier;
//! use homeguard_panel::panel::SecurityPanel;
//!
//! let mut panel = SecurityPanel::new(MemoryStore::new(), FakeClassifier::new());
//! let sensor = Sensor::new("front door", SensorKind::Door);
//! panel.add_sensor(sensor.clone()).unwrap();
//!
//! panel.set_arming_status(ArmingStatus::ArmedHome).unwrap();
//! panel.change_sensor_activation(&sensor, true).unwrap();
//! ```

pub mod activity;
pub mod config;
pub mod data;
pub mod image;
pub mod panel;
pub mod sim;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at crate root for convenience
pub use activity::{ActivityLog, ActivityStats, SharedActivityLog};
pub use config::Config;
pub use data::{
    AlarmStatus, ArmingStatus, FileStore, MemoryStore, SecurityStore, Sensor, SensorKind,
    StoreError,
};
pub use image::{CameraImage, ClassifierError, FakeClassifier, ImageClassifier};
pub use panel::{ConsoleListener, SecurityError, SecurityPanel, StatusListener};
pub use sim::{FeedConfig, SensorSignal, SimulatedFeed};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
