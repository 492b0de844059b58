//! Status listener port and the console implementation.

use crate::data::AlarmStatus;

/// Callback interface notified of panel state changes.
///
/// Dispatch is synchronous and in-process. Implementations must not assume
/// any particular ordering between listeners.
pub trait StatusListener: Send + Sync {
    /// The alarm status changed to the given value.
    fn on_alarm_status_changed(&self, status: AlarmStatus);

    /// A sensor was added, removed, or changed its activation flag.
    fn on_sensor_status_changed(&self);

    /// An image was classified; `detected` is the raw result, fired after
    /// every classification regardless of whether the alarm status moved.
    fn on_intruder_result(&self, detected: bool);
}

/// A listener that prints status changes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleListener;

impl ConsoleListener {
    pub fn new() -> Self {
        Self
    }
}

impl StatusListener for ConsoleListener {
    fn on_alarm_status_changed(&self, status: AlarmStatus) {
        println!("[panel] alarm status: {status}");
    }

    fn on_sensor_status_changed(&self) {
        println!("[panel] sensor state changed");
    }

    fn on_intruder_result(&self, detected: bool) {
        println!(
            "[panel] camera: {}",
            if detected { "intruder detected" } else { "clear" }
        );
    }
}
