//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use tracing::info;

use crate::{
    error::TimerError,
    state::{AppState, TimerRegistry, Tone},
};
use super::responses::{
    ApiError, ConfigureRequest, CountRequest, HealthResponse, NotificationQuery,
    NotificationsResponse, StatusResponse, TimerResponse, TimersResponse, ToneInfo,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

fn timers_response(registry: &TimerRegistry) -> TimersResponse {
    TimersResponse {
        timestamp: Utc::now(),
        running: registry.running_count(),
        timers: registry.snapshot(registry.now()),
    }
}

/// Apply a single-timer action and return the timer as it is afterwards
fn timer_action<F>(state: &AppState, action: &str, index: usize, apply: F) -> ApiResult<TimerResponse>
where
    F: FnOnce(&mut TimerRegistry, usize) -> Result<(), TimerError>,
{
    let view = state.update(action, |registry| {
        apply(registry, index)?;
        registry.view(index, registry.now())
    })?;
    info!("{} timer {} ({:?})", action, index, view.name);
    Ok(Json(TimerResponse::new(view)))
}

/// Apply a group action and return every timer
fn group_action<F>(state: &AppState, action: &str, apply: F) -> ApiResult<TimersResponse>
where
    F: FnOnce(&mut TimerRegistry),
{
    let response = state.update(action, |registry| {
        apply(registry);
        Ok(timers_response(registry))
    })?;
    info!("{}: {} timer(s) running", action, response.running);
    Ok(Json(response))
}

/// Handle GET /timers - All active timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    Ok(Json(state.read(timers_response)?))
}

/// Handle GET /timers/:index - One timer
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<TimerResponse> {
    let view = state.read(|registry| registry.view(index, registry.now()))??;
    Ok(Json(TimerResponse::new(view)))
}

/// Handle PUT /timers/:index - Change name, duration or tone
pub async fn configure_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(request): Json<ConfigureRequest>,
) -> ApiResult<TimerResponse> {
    let (outcome, view) = state.update("configure", |registry| {
        let config = request.apply_to(registry.config(index)?.clone())?;
        let outcome = registry.configure(index, config)?;
        Ok((outcome, registry.view(index, registry.now())?))
    })?;
    Ok(Json(TimerResponse::configured(outcome, view)))
}

/// Handle POST /timers/:index/start
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<TimerResponse> {
    timer_action(&state, "start", index, |registry, index| registry.start(index))
}

/// Handle POST /timers/:index/stop
pub async fn stop_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<TimerResponse> {
    timer_action(&state, "stop", index, |registry, index| registry.stop(index))
}

/// Handle POST /timers/:index/reset
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<TimerResponse> {
    timer_action(&state, "reset", index, |registry, index| registry.reset(index))
}

/// Handle POST /all/start
pub async fn start_all_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    group_action(&state, "start-all", |registry| registry.start_all())
}

/// Handle POST /all/stop
pub async fn stop_all_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    group_action(&state, "stop-all", |registry| registry.stop_all())
}

/// Handle POST /all/reset
pub async fn reset_all_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimersResponse> {
    group_action(&state, "reset-all", |registry| registry.reset_all())
}

/// Handle PUT /timer-count - Show more or fewer timers
pub async fn set_count_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CountRequest>,
) -> ApiResult<TimersResponse> {
    let response = state.update("set-count", |registry| {
        registry.set_active_count(request.count)?;
        Ok(timers_response(registry))
    })?;
    Ok(Json(response))
}

/// Handle GET /timers/:index/tone.wav - Test the timer's notification sound
pub async fn test_tone_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let tone = state.read(|registry| registry.config(index).map(|config| config.tone))??;
    let wav = state.synthesizer.render(tone)?;
    info!("Serving test tone {} for timer {}", tone, index);
    Ok(([(header::CONTENT_TYPE, "audio/wav")], wav.into_bytes()))
}

/// Handle GET /tones - The tone palette
pub async fn tones_handler() -> Json<Vec<ToneInfo>> {
    Json(Tone::ALL.into_iter().map(ToneInfo::from).collect())
}

/// Handle GET /notifications - Completions, optionally only those after a sequence number
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<NotificationsResponse> {
    let notifications = state.notifications_since(query.after)?;
    Ok(Json(NotificationsResponse { notifications }))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let (timer_count, running_count) =
        state.read(|registry| (registry.len(), registry.running_count()))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer_count,
        running_count,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
