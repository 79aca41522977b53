//! HTTP surface of the simulated lightbulb.
//!
//! This module implements the wire contract that "HTTP lightbulb" accessory
//! drivers expect: plain-text GET/POST routes that read or mutate the device
//! state, with a `1`/`0` status-polling body for the power state.

pub mod state;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::web::state::{LightField, LightState};

/// Application state shared with all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Simulated device state.
    pub light: LightState,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

/// Build the route table of the simulated device.
///
/// Unknown paths answer 404 with an empty body; that includes single-segment
/// paths that are not a known field name, which land in the `{field}`
/// handlers and are rejected there.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/on", get(turn_on).post(turn_on_post))
        .route("/off", get(turn_off).post(turn_off_post))
        // The device contract has no POST /status; answer 404 rather than
        // axum's default 405 for a known path with the wrong method.
        .route("/status", get(status).post(|| async { StatusCode::NOT_FOUND }))
        .route("/{field}", get(field_read).post(field_write_body))
        .route("/{field}/{value}", get(field_write).post(field_write_path))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the device server and run it until the process is terminated.
pub async fn serve(config: ServerConfig, light: LightState) -> Result<(), std::io::Error> {
    let app = router(AppState { light });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Dummy lightbulb server running on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Power state as the single-byte body the status-polling drivers parse.
fn power_body(light: &LightState) -> &'static str {
    if light.is_on() { "1" } else { "0" }
}

/// `GET /on` - turn the bulb on and reflect the new power state.
async fn turn_on(State(state): State<AppState>) -> &'static str {
    state.light.set_on(true);
    info!("Lightbulb turned on");
    power_body(&state.light)
}

/// `GET /off` - turn the bulb off and reflect the new power state.
async fn turn_off(State(state): State<AppState>) -> &'static str {
    state.light.set_on(false);
    info!("Lightbulb turned off");
    power_body(&state.light)
}

/// `GET /status` - report the power state without touching it.
async fn status(State(state): State<AppState>) -> &'static str {
    power_body(&state.light)
}

/// `GET /{field}` - report the current value of a numeric field.
async fn field_read(State(state): State<AppState>, Path(field): Path<String>) -> Response {
    match field.parse::<LightField>() {
        Ok(field) => state.light.get(field).to_string().into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// `GET /{field}/{value}` - assign a numeric field and report its value
/// after assignment. Tokens that do not parse as integers leave the field
/// untouched; the response still carries the current value.
async fn field_write(
    State(state): State<AppState>,
    Path((field, value)): Path<(String, String)>,
) -> Response {
    let Ok(field) = field.parse::<LightField>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Ok(value) = value.parse::<i64>() {
        state.light.set(field, value);
        info!("{} set to {}", field.display_name(), value);
    }
    state.light.get(field).to_string().into_response()
}

/// `POST /on` - turn the bulb on.
async fn turn_on_post(State(state): State<AppState>) -> &'static str {
    state.light.set_on(true);
    "OK"
}

/// `POST /off` - turn the bulb off.
async fn turn_off_post(State(state): State<AppState>) -> &'static str {
    state.light.set_on(false);
    "OK"
}

/// `POST /{field}` - assign a numeric field from the request body.
/// Unparseable payloads are skipped; the response is `OK` either way.
async fn field_write_body(
    State(state): State<AppState>,
    Path(field): Path<String>,
    body: Bytes,
) -> Response {
    let Ok(field) = field.parse::<LightField>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(value) = parse_body_int(&body) {
        state.light.set(field, value);
    }
    "OK".into_response()
}

/// `POST /{field}/{value}` - assign a numeric field from the path segment,
/// with the same silent-skip semantics as the body variant.
async fn field_write_path(
    State(state): State<AppState>,
    Path((field, value)): Path<(String, String)>,
) -> Response {
    let Ok(field) = field.parse::<LightField>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Ok(value) = value.parse::<i64>() {
        state.light.set(field, value);
    }
    "OK".into_response()
}

/// Best-effort integer parse of a request body. Surrounding whitespace is
/// tolerated; malformed UTF-8 and non-numeric payloads yield `None`.
fn parse_body_int(body: &[u8]) -> Option<i64> {
    std::str::from_utf8(body).ok()?.trim().parse().ok()
}
