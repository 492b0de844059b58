//! HTTP server for remote panel control.
//!
//! Exposes the panel operations over a small JSON API so a display or a
//! remote operator console can drive the panel without linking the crate:
//!
//! ```text
//! operator console ──→ POST /arming ───┐
//! sensor gateway  ──→ POST /sensors/event ──→ SecurityPanel ──→ store (JSON)
//! camera uplink   ──→ POST /image ─────┘
//! ```

use crate::activity::{ActivityLog, ActivityStats, SharedActivityLog};
use crate::data::{AlarmStatus, ArmingStatus, FileStore, Sensor, SensorKind};
use crate::image::{CameraImage, FakeClassifier};
use crate::panel::{SecurityError, SecurityPanel};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind to (0 for random)
    pub port: u16,
    /// Path of the panel-state store file
    pub store_path: PathBuf,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(port: u16, store_path: PathBuf) -> Self {
        Self { port, store_path }
    }
}

/// Shared server state
pub struct ServerState {
    /// The alarm state machine; one event fully completes before the next
    panel: RwLock<SecurityPanel<FileStore, FakeClassifier>>,
    /// Activity counters, also registered as a panel listener
    activity: SharedActivityLog,
}

impl ServerState {
    /// Create new server state over the given store file.
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.store_path)?;
        let mut panel = SecurityPanel::new(store, FakeClassifier::new());

        let activity: SharedActivityLog = Arc::new(ActivityLog::new());
        panel.add_status_listener(activity.clone());

        Ok(Self {
            panel: RwLock::new(panel),
            activity,
        })
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Full panel status
#[derive(Serialize)]
pub struct StatusResponse {
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
    pub sensors: Vec<Sensor>,
    pub activity: ActivityStats,
}

/// Arming change request
#[derive(Debug, Deserialize)]
pub struct ArmingRequest {
    pub status: ArmingStatus,
}

/// Sensor add/remove request
#[derive(Debug, Deserialize)]
pub struct SensorRequest {
    pub name: String,
    pub kind: SensorKind,
}

/// Sensor hardware event
#[derive(Debug, Deserialize)]
pub struct SensorEventRequest {
    pub name: String,
    pub kind: SensorKind,
    pub active: bool,
}

/// Camera frame submission
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Image classification response
#[derive(Serialize)]
pub struct ImageResponse {
    pub intruder: bool,
    pub alarm_status: AlarmStatus,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: SecurityError) -> ApiError {
    let (status, code) = match &err {
        SecurityError::UnknownSensor(_) => (StatusCode::NOT_FOUND, "UNKNOWN_SENSOR"),
        SecurityError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        SecurityError::Classifier(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CLASSIFIER_ERROR"),
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        }),
    )
}

fn status_body(
    panel: &SecurityPanel<FileStore, FakeClassifier>,
    activity: &ActivityLog,
) -> Result<StatusResponse, ApiError> {
    Ok(StatusResponse {
        arming_status: panel.arming_status().map_err(api_error)?,
        alarm_status: panel.alarm_status().map_err(api_error)?,
        sensors: panel.sensors().map_err(api_error)?,
        activity: activity.stats(),
    })
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /status
async fn status(State(state): State<Arc<ServerState>>) -> Result<Json<StatusResponse>, ApiError> {
    let panel = state.panel.read().await;
    Ok(Json(status_body(&panel, &state.activity)?))
}

/// POST /arming
async fn set_arming(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ArmingRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut panel = state.panel.write().await;
    panel.set_arming_status(req.status).map_err(api_error)?;
    tracing::info!("arming status set to {}", req.status);

    Ok(Json(status_body(&panel, &state.activity)?))
}

/// POST /sensors
async fn add_sensor(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SensorRequest>,
) -> Result<StatusCode, ApiError> {
    let mut panel = state.panel.write().await;
    panel
        .add_sensor(Sensor::new(req.name, req.kind))
        .map_err(api_error)?;
    Ok(StatusCode::CREATED)
}

/// DELETE /sensors
async fn remove_sensor(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SensorRequest>,
) -> Result<StatusCode, ApiError> {
    let mut panel = state.panel.write().await;
    panel
        .remove_sensor(&Sensor::new(req.name, req.kind))
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sensors/event
async fn sensor_event(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SensorEventRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut panel = state.panel.write().await;
    let sensor = Sensor::new(req.name, req.kind);
    panel
        .change_sensor_activation(&sensor, req.active)
        .map_err(api_error)?;
    tracing::debug!(
        "sensor event: {} {} -> {}",
        sensor.kind,
        sensor.name,
        req.active
    );

    Ok(Json(status_body(&panel, &state.activity)?))
}

/// POST /image
async fn process_image(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let mut panel = state.panel.write().await;
    let image = CameraImage::new(req.width, req.height, req.data);
    let intruder = panel.process_image(&image).map_err(api_error)?;

    Ok(Json(ImageResponse {
        intruder,
        alarm_status: panel.alarm_status().map_err(api_error)?,
    }))
}

/// Run the HTTP server
pub async fn run(
    config: ServerConfig,
) -> anyhow::Result<(SocketAddr, tokio::sync::oneshot::Sender<()>)> {
    let state = Arc::new(ServerState::new(&config)?);

    let app = Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/arming", post(set_arming))
        .route("/sensors", post(add_sensor).delete(remove_sensor))
        .route("/sensors/event", post(sensor_event))
        .route("/image", post(process_image))
        .layer(
            CorsLayer::new()
                .allow_origin([
                    HeaderValue::from_static("http://localhost"),
                    HeaderValue::from_static("http://127.0.0.1"),
                ])
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Panel server listening on http://{}", actual_addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Server shutdown signal received");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_addr, shutdown_tx))
}
