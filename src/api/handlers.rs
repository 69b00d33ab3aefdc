//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, DurationRequest, ErrorResponse, HealthResponse, StatusResponse, ThemeRequest,
};
use crate::state::{AppState, DurationSelection, TimerInput};

/// Forward an input to the driver and answer with the resulting frame
async fn dispatch(state: &AppState, action: &str, input: TimerInput) -> Response {
    match state.send(action, input).await {
        Ok(event) => {
            info!("{} endpoint called - {:?}", action, event);
            let message = format!("{} applied", action);
            Json(ApiResponse::new(event, message, state.current_frame())).into_response()
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle POST /tap - Start, pause, resume or reset the countdown
pub async fn tap_handler(State(state): State<Arc<AppState>>) -> Response {
    dispatch(&state, "tap", TimerInput::Tap).await
}

/// Handle POST /duration - Change the selectors
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Response {
    match DurationSelection::new(request.minutes, request.seconds) {
        Ok(selection) => dispatch(&state, "duration", TimerInput::SetDuration(selection)).await,
        Err(e) => {
            warn!("Rejected duration request: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}

/// Handle POST /theme - Toggle dark mode
pub async fn theme_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThemeRequest>,
) -> Response {
    dispatch(&state, "theme", TimerInput::SetDarkMode(request.dark)).await
}

/// Handle POST /reset - Rebuild the session from stored preferences
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    dispatch(&state, "reset", TimerInput::Reload).await
}

/// Handle GET /status - Return the current frame
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        frame: state.current_frame(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /widget.svg - Draw the current frame
pub async fn widget_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.current_frame().to_svg(),
    )
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
