//! Simulated sensor feed.
//!
//! Stands in for real sensor hardware: a background thread emits
//! pseudo-random activation toggles for a fixed set of sensors over a
//! bounded channel. Seeded explicitly so runs are reproducible.

use crate::data::{Sensor, SensorKind};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A reported hardware event: a sensor's activation flag changed.
#[derive(Debug, Clone)]
pub struct SensorSignal {
    pub sensor: Sensor,
    pub active: bool,
}

/// Configuration for the simulated feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Sensors the feed reports for
    pub sensors: Vec<Sensor>,
    /// Interval between emitted events
    pub interval: Duration,
    /// PRNG seed
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sensors: vec![
                Sensor::new("front door", SensorKind::Door),
                Sensor::new("kitchen window", SensorKind::Window),
                Sensor::new("hallway", SensorKind::Motion),
            ],
            interval: Duration::from_millis(1500),
            seed: 0x5eed,
        }
    }
}

/// Errors that can occur while running the feed.
#[derive(Debug)]
pub enum FeedError {
    AlreadyRunning,
    NoSensors,
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::AlreadyRunning => write!(f, "Feed is already running"),
            FeedError::NoSensors => write!(f, "Feed has no sensors to report for"),
        }
    }
}

impl std::error::Error for FeedError {}

/// A background thread emitting simulated sensor events.
pub struct SimulatedFeed {
    config: FeedConfig,
    sender: Sender<SensorSignal>,
    receiver: Receiver<SensorSignal>,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SimulatedFeed {
    /// Create a new feed. No events are emitted until [`start`](Self::start).
    pub fn new(config: FeedConfig) -> Self {
        let (sender, receiver) = bounded(1024);
        Self {
            config,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Start emitting events.
    pub fn start(&mut self) -> Result<(), FeedError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(FeedError::AlreadyRunning);
        }
        if self.config.sensors.is_empty() {
            return Err(FeedError::NoSensors);
        }
        self.running.store(true, Ordering::SeqCst);

        let running = self.running.clone();
        let sender = self.sender.clone();
        let sensors = self.config.sensors.clone();
        let interval = self.config.interval;
        let mut rng = XorShift::new(self.config.seed);
        // Track last reported flag per sensor so toggles alternate sensibly.
        let mut flags = vec![false; sensors.len()];

        let handle = thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                let idx = (rng.next() as usize) % sensors.len();
                // Mostly toggles, occasionally a repeated report.
                let active = if rng.next() % 8 == 0 {
                    flags[idx]
                } else {
                    !flags[idx]
                };
                flags[idx] = active;

                let signal = SensorSignal {
                    sensor: sensors[idx].clone(),
                    active,
                };
                // Receiver fell behind or went away; drop the event.
                let _ = sender.try_send(signal);
            }
        });

        self.handle = Some(handle);
        Ok(())
    }

    /// Stop emitting events and join the worker thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the feed is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for sensor signals.
    pub fn receiver(&self) -> &Receiver<SensorSignal> {
        &self.receiver
    }
}

impl Drop for SimulatedFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Small xorshift PRNG; good enough for a simulator and fully reproducible.
struct XorShift {
    state: u64,
}

impl XorShift {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
