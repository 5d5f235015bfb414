//! Runtime state of a single timer

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Where a timer is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Ready,
    Running,
    Finished,
}

/// Countdown state for one timer slot.
///
/// `started_at` is only present while Running or Finished, so the remaining
/// time can always be recomputed from it instead of being stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    status: TimerStatus,
    started_at: Option<Instant>,
    duration_seconds: f64,
}

impl TimerState {
    /// Create a ready timer with the given duration snapshot
    pub fn ready(duration_seconds: f64) -> Self {
        Self {
            status: TimerStatus::Ready,
            started_at: None,
            duration_seconds,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Begin a new run. Returns false if the timer was already running.
    pub fn start(&mut self, duration_seconds: f64, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.status = TimerStatus::Running;
        self.started_at = Some(now);
        self.duration_seconds = duration_seconds;
        true
    }

    /// Abandon the current run. The next start counts down from the full duration.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.status = TimerStatus::Ready;
        self.started_at = None;
        true
    }

    pub fn reset(&mut self, duration_seconds: f64) {
        self.status = TimerStatus::Ready;
        self.started_at = None;
        self.duration_seconds = duration_seconds;
    }

    /// Follow a config edit. Ignored while running.
    pub fn set_duration(&mut self, duration_seconds: f64) {
        if !self.is_running() {
            self.duration_seconds = duration_seconds;
        }
    }

    /// Seconds left at `now`
    pub fn remaining_seconds(&self, now: Instant) -> f64 {
        match (self.status, self.started_at) {
            (TimerStatus::Running, Some(started_at)) => {
                let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
                (self.duration_seconds - elapsed).max(0.0)
            }
            (TimerStatus::Finished, _) => 0.0,
            _ => self.duration_seconds,
        }
    }

    /// Move a running timer whose countdown reached zero to Finished.
    /// Returns true only on that transition.
    pub fn finish_if_elapsed(&mut self, now: Instant) -> bool {
        if self.is_running() && self.remaining_seconds(now) <= 0.0 {
            self.status = TimerStatus::Finished;
            return true;
        }
        false
    }
}
