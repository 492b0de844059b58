//! The alarm state machine and its listener port.

pub mod listener;
pub mod machine;

// Re-export commonly used types
pub use listener::{ConsoleListener, StatusListener};
pub use machine::{SecurityError, SecurityPanel, INTRUDER_CONFIDENCE_THRESHOLD};
