//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(list_timers_handler))
        .route("/timers/:index", get(get_timer_handler).put(configure_timer_handler))
        .route("/timers/:index/start", post(start_timer_handler))
        .route("/timers/:index/stop", post(stop_timer_handler))
        .route("/timers/:index/reset", post(reset_timer_handler))
        .route("/timers/:index/tone.wav", get(test_tone_handler))
        .route("/all/start", post(start_all_handler))
        .route("/all/stop", post(stop_all_handler))
        .route("/all/reset", post(reset_all_handler))
        .route("/timer-count", put(set_count_handler))
        .route("/tones", get(tones_handler))
        .route("/notifications", get(notifications_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
