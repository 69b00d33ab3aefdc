//! HTTP API module
//!
//! This module contains the endpoints standing in for the widget's tap
//! target, selectors and theme toggle.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tap", post(tap_handler))
        .route("/duration", post(duration_handler))
        .route("/theme", post(theme_handler))
        .route("/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .route("/widget.svg", get(widget_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
