//! Homeguard Panel CLI
//!
//! Home security monitoring panel with a sensor-driven alarm state machine.

use clap::{Parser, Subcommand, ValueEnum};
use homeguard_panel::{
    activity::create_shared_log_with_persistence,
    config::Config,
    data::{ArmingStatus, FileStore, Sensor, SensorKind},
    image::{CameraImage, FakeClassifier},
    panel::{ConsoleListener, SecurityPanel},
    sim::{FeedConfig, SimulatedFeed},
    VERSION,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "homeguard")]
#[command(version = VERSION)]
#[command(about = "Home security monitoring panel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current panel status
    Status,

    /// Arm the panel
    Arm {
        /// Arming mode
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Disarm the panel
    Disarm,

    /// Manage sensors
    Sensor {
        #[command(subcommand)]
        command: SensorCommands,
    },

    /// Classify a camera frame and apply the result to the panel
    ProcessImage {
        /// Path of the image file (raw samples)
        path: PathBuf,
    },

    /// Run the panel against the simulated sensor feed
    Run {
        /// Interval between simulated events in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Seed for the simulated feed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve the panel over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Port to bind to (defaults to the configured port, 0 for random)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config,
}

#[derive(Subcommand)]
enum SensorCommands {
    /// Register a sensor
    Add {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },

    /// Remove a sensor
    Remove {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },

    /// Report a sensor activation change
    Set {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        active: bool,
    },

    /// List registered sensors
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Home,
    Away,
}

impl From<ModeArg> for ArmingStatus {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Home => ArmingStatus::ArmedHome,
            ModeArg::Away => ArmingStatus::ArmedAway,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Door,
    Window,
    Motion,
}

impl From<KindArg> for SensorKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Door => SensorKind::Door,
            KindArg::Window => SensorKind::Window,
            KindArg::Motion => SensorKind::Motion,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => cmd_status(),
        Commands::Arm { mode } => cmd_set_arming(mode.into()),
        Commands::Disarm => cmd_set_arming(ArmingStatus::Disarmed),
        Commands::Sensor { command } => cmd_sensor(command),
        Commands::ProcessImage { path } => cmd_process_image(&path),
        Commands::Run { interval_ms, seed } => cmd_run(interval_ms, seed),
        #[cfg(feature = "server")]
        Commands::Serve { port } => cmd_serve(port),
        Commands::Config => cmd_config(),
    }
}

type Panel = SecurityPanel<FileStore, FakeClassifier>;

/// Open the persisted panel with a console listener attached.
fn open_panel(config: &Config) -> Panel {
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let store = match FileStore::open(config.store_path()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening panel store: {e}");
            std::process::exit(1);
        }
    };

    let mut panel = SecurityPanel::new(store, FakeClassifier::new());
    panel.add_status_listener(Arc::new(ConsoleListener::new()));
    panel
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();
    let panel = open_panel(&config);

    println!("Homeguard Panel Status");
    println!("======================");
    println!();

    match (panel.arming_status(), panel.alarm_status(), panel.sensors()) {
        (Ok(arming), Ok(alarm), Ok(sensors)) => {
            println!("Arming: {arming}");
            println!("Alarm:  {alarm}");
            println!();
            if sensors.is_empty() {
                println!("No sensors registered.");
            } else {
                println!("Sensors:");
                for sensor in sensors {
                    println!(
                        "  [{}] {} ({})",
                        if sensor.active { "x" } else { " " },
                        sensor.name,
                        sensor.kind
                    );
                }
            }
        }
        (arming, alarm, sensors) => {
            for err in [
                arming.err().map(|e| e.to_string()),
                alarm.err().map(|e| e.to_string()),
                sensors.err().map(|e| e.to_string()),
            ]
            .into_iter()
            .flatten()
            {
                eprintln!("Error reading panel state: {err}");
            }
            std::process::exit(1);
        }
    }

    // Show cumulative activity stats if available
    let activity_path = config.activity_path();
    if activity_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&activity_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!();
                println!("Cumulative Statistics:");
                if let Some(events) = stats.get("sensor_events") {
                    println!("  Sensor events: {events}");
                }
                if let Some(transitions) = stats.get("alarm_transitions") {
                    println!("  Alarm transitions: {transitions}");
                }
                if let Some(images) = stats.get("images_processed") {
                    println!("  Images processed: {images}");
                }
                if let Some(detections) = stats.get("intruder_detections") {
                    println!("  Intruder detections: {detections}");
                }
            }
        }
    }
}

fn cmd_set_arming(status: ArmingStatus) {
    let config = Config::load().unwrap_or_default();
    let mut panel = open_panel(&config);

    if let Err(e) = panel.set_arming_status(status) {
        eprintln!("Error changing arming status: {e}");
        std::process::exit(1);
    }
    println!("Panel is now: {status}");
}

fn cmd_sensor(command: SensorCommands) {
    let config = Config::load().unwrap_or_default();
    let mut panel = open_panel(&config);

    let result = match command {
        SensorCommands::Add { name, kind } => {
            let sensor = Sensor::new(name.clone(), kind.into());
            panel.add_sensor(sensor).map(|_| {
                println!("Added sensor: {name}");
            })
        }
        SensorCommands::Remove { name, kind } => {
            let sensor = Sensor::new(name.clone(), kind.into());
            panel.remove_sensor(&sensor).map(|_| {
                println!("Removed sensor: {name}");
            })
        }
        SensorCommands::Set { name, kind, active } => {
            let sensor = Sensor::new(name.clone(), kind.into());
            panel.change_sensor_activation(&sensor, active).map(|_| {
                println!(
                    "Sensor {name} is now {}",
                    if active { "active" } else { "inactive" }
                );
            })
        }
        SensorCommands::List => {
            match panel.sensors() {
                Ok(sensors) if sensors.is_empty() => println!("No sensors registered."),
                Ok(sensors) => {
                    for sensor in sensors {
                        println!(
                            "[{}] {} ({})",
                            if sensor.active { "x" } else { " " },
                            sensor.name,
                            sensor.kind
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error listing sensors: {e}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_process_image(path: &PathBuf) {
    let config = Config::load().unwrap_or_default();
    let mut panel = open_panel(&config);

    let image = match CameraImage::from_file(path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error reading image: {e}");
            std::process::exit(1);
        }
    };

    match panel.process_image(&image) {
        Ok(detected) => {
            println!(
                "Classification: {}",
                if detected { "intruder detected" } else { "clear" }
            );
            match panel.alarm_status() {
                Ok(alarm) => println!("Alarm: {alarm}"),
                Err(e) => eprintln!("Error reading alarm status: {e}"),
            }
        }
        Err(e) => {
            eprintln!("Error processing image: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_run(interval_ms: Option<u64>, seed: Option<u64>) {
    println!("Homeguard Panel v{VERSION}");
    println!();

    let config = Config::load().unwrap_or_default();
    let mut panel = open_panel(&config);

    // Count activity across the session, persisted for `status`.
    let activity = create_shared_log_with_persistence(config.activity_path());
    panel.add_status_listener(activity.clone());

    // Feed reports for the registered sensors; register the defaults first
    // on a fresh panel so the feed has something to do.
    let mut sensors = match panel.sensors() {
        Ok(sensors) => sensors,
        Err(e) => {
            eprintln!("Error reading sensors: {e}");
            std::process::exit(1);
        }
    };
    if sensors.is_empty() {
        println!("No sensors registered; adding the default simulated set.");
        for sensor in FeedConfig::default().sensors {
            if let Err(e) = panel.add_sensor(sensor.clone()) {
                eprintln!("Error adding sensor: {e}");
                std::process::exit(1);
            }
            sensors.push(sensor);
        }
    }

    let feed_config = FeedConfig {
        sensors,
        interval: Duration::from_millis(interval_ms.unwrap_or(config.sim_interval_ms)),
        seed: seed.unwrap_or(config.sim_seed),
    };
    let mut feed = SimulatedFeed::new(feed_config);

    println!("Panel ID: {}", panel.panel_id());
    println!("Arming: {}", panel.arming_status().map(|s| s.to_string()).unwrap_or_default());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    if let Err(e) = feed.start() {
        eprintln!("Error starting sensor feed: {e}");
        std::process::exit(1);
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let receiver = feed.receiver().clone();

    while running.load(Ordering::SeqCst) {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(signal) => {
                println!(
                    "[feed] {} ({}) -> {}",
                    signal.sensor.name,
                    signal.sensor.kind,
                    if signal.active { "active" } else { "inactive" }
                );
                if let Err(e) = panel.change_sensor_activation(&signal.sensor, signal.active) {
                    eprintln!("Error applying sensor event: {e}");
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Sensor feed disconnected unexpectedly");
                break;
            }
        }
    }

    println!();
    println!("Stopping feed...");
    feed.stop();

    if let Err(e) = activity.save() {
        eprintln!("Warning: Could not save activity log: {e}");
    }

    println!();
    println!("{}", activity.summary());
}

#[cfg(feature = "server")]
fn cmd_serve(port: Option<u16>) {
    use homeguard_panel::server::{run, ServerConfig};

    tracing_subscriber::fmt::init();

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let server_config = ServerConfig::new(port.unwrap_or(config.server_port), config.store_path());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error creating runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let (addr, shutdown_tx) = match run(server_config).await {
            Ok(started) => started,
            Err(e) => {
                eprintln!("Error starting server: {e}");
                std::process::exit(1);
            }
        };
        println!("Panel server listening on http://{addr}");
        println!("Press Ctrl+C to stop");

        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!("Panel store: {:?}", config.store_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
