//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::TimerError,
    state::{ConfigureOutcome, Notification, StateError, TimerConfig, TimerView, Tone},
};

/// Body of `PUT /timers/:index`. Missing fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigureRequest {
    pub name: Option<String>,
    pub minutes: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub tone_hz: Option<u32>,
}

impl ConfigureRequest {
    /// Overlay the requested changes onto the current config.
    /// `duration_seconds` wins over `minutes` when both are given.
    pub fn apply_to(self, current: TimerConfig) -> Result<TimerConfig, TimerError> {
        let tone = match self.tone_hz {
            Some(hz) => Tone::from_hz(hz)?,
            None => current.tone,
        };
        let duration_seconds = self
            .duration_seconds
            .or(self.minutes.map(|minutes| minutes * 60.0))
            .unwrap_or(current.duration_seconds);

        Ok(TimerConfig {
            name: self.name.unwrap_or(current.name),
            duration_seconds,
            tone,
        })
    }
}

/// Body of `PUT /timer-count`
#[derive(Debug, Clone, Deserialize)]
pub struct CountRequest {
    pub count: usize,
}

/// Query of `GET /notifications`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    pub after: Option<u64>,
}

/// Every active timer
#[derive(Debug, Clone, Serialize)]
pub struct TimersResponse {
    pub timestamp: DateTime<Utc>,
    pub running: usize,
    pub timers: Vec<TimerView>,
}

/// A single timer, optionally with the result of a configure call
#[derive(Debug, Clone, Serialize)]
pub struct TimerResponse {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ConfigureOutcome>,
    pub timer: TimerView,
}

impl TimerResponse {
    pub fn new(timer: TimerView) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: None,
            timer,
        }
    }

    pub fn configured(outcome: ConfigureOutcome, timer: TimerView) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::new(timer)
        }
    }
}

/// One entry of the tone palette
#[derive(Debug, Clone, Serialize)]
pub struct ToneInfo {
    pub note: &'static str,
    pub hz: u32,
}

impl From<Tone> for ToneInfo {
    fn from(tone: Tone) -> Self {
        Self {
            note: tone.note_name(),
            hz: tone.frequency_hz(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Server summary
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer_count: usize,
    pub running_count: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError(pub StateError);

impl From<StateError> for ApiError {
    fn from(error: StateError) -> Self {
        ApiError(error)
    }
}

impl From<TimerError> for ApiError {
    fn from(error: TimerError) -> Self {
        ApiError(StateError::Timer(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            StateError::Timer(e) => {
                let status = match e {
                    TimerError::UnknownTimer { .. } => StatusCode::NOT_FOUND,
                    TimerError::SynthesisUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    TimerError::InvalidDuration { .. }
                    | TimerError::InvalidName
                    | TimerError::UnknownTone { .. }
                    | TimerError::InvalidTimerCount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, e.kind())
            }
            StateError::Poisoned(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        let body = ErrorResponse {
            error: kind,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
