//! Main application state management

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::{Clock, SystemClock, TimerRegistry, Tone};
use crate::{audio::Synthesizer, error::TimerError};

/// How many completion notifications are kept for the shell
const NOTIFICATION_HISTORY: usize = 32;

/// Errors raised while working with the shared state
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("failed to lock {0}")]
    Poisoned(&'static str),
}

/// A timer reaching zero, as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub sequence: u64,
    pub index: usize,
    pub name: String,
    pub tone: Tone,
    pub finished_at: DateTime<Utc>,
    /// The completion tone as a `data:audio/wav;base64,...` URI, or `None`
    /// when it could not be synthesized and only the visual notification is shown
    pub audio: Option<String>,
}

impl Notification {
    pub fn is_audible(&self) -> bool {
        self.audio.is_some()
    }
}

#[derive(Debug, Default)]
struct NotificationLog {
    next_sequence: u64,
    entries: VecDeque<Notification>,
}

/// Shared state of the running server: one registry plus shell bookkeeping
pub struct AppState<C: Clock = SystemClock> {
    /// The timers. Every mutation and every tick runs under this one lock.
    pub registry: Mutex<TimerRegistry<C>>,
    /// Tone backend used for completion and test sounds
    pub synthesizer: Arc<dyn Synthesizer>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    notifications: Mutex<NotificationLog>,
}

impl<C: Clock> AppState<C> {
    pub fn new(
        registry: TimerRegistry<C>,
        synthesizer: Arc<dyn Synthesizer>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            registry: Mutex::new(registry),
            synthesizer,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            notifications: Mutex::new(NotificationLog::default()),
        }
    }

    fn lock_registry(&self) -> Result<MutexGuard<'_, TimerRegistry<C>>, StateError> {
        self.registry.lock().map_err(|_| StateError::Poisoned("timer registry"))
    }

    /// Read from the registry under its lock
    pub fn read<T, F>(&self, reader: F) -> Result<T, StateError>
    where
        F: FnOnce(&TimerRegistry<C>) -> T,
    {
        let registry = self.lock_registry()?;
        Ok(reader(&registry))
    }

    /// Mutate the registry under its lock without recording a user action
    pub fn write<T, F>(&self, writer: F) -> Result<T, StateError>
    where
        F: FnOnce(&mut TimerRegistry<C>) -> T,
    {
        let mut registry = self.lock_registry()?;
        Ok(writer(&mut registry))
    }

    /// Apply a user action to the registry and record it as the last action.
    ///
    /// Failed actions are not recorded.
    pub fn update<T, F>(&self, action: &str, updater: F) -> Result<T, StateError>
    where
        F: FnOnce(&mut TimerRegistry<C>) -> Result<T, TimerError>,
    {
        let mut registry = self.lock_registry()?;
        let result = updater(&mut registry)?;
        drop(registry); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    /// Record that a timer finished and return the stored notification
    pub fn push_notification(
        &self,
        index: usize,
        name: String,
        tone: Tone,
        audio: Option<String>,
    ) -> Notification {
        let mut log = self.notifications.lock().unwrap_or_else(|poisoned| {
            warn!("Notification log lock poisoned, recovering");
            poisoned.into_inner()
        });

        let notification = Notification {
            sequence: log.next_sequence,
            index,
            name,
            tone,
            finished_at: Utc::now(),
            audio,
        };
        log.next_sequence += 1;
        log.entries.push_back(notification.clone());
        while log.entries.len() > NOTIFICATION_HISTORY {
            log.entries.pop_front();
        }

        info!("Notification #{}: {:?} finished", notification.sequence, notification.name);
        notification
    }

    /// Notifications newer than `after`, oldest first
    pub fn notifications_since(&self, after: Option<u64>) -> Result<Vec<Notification>, StateError> {
        let log = self.notifications.lock()
            .map_err(|_| StateError::Poisoned("notification log"))?;

        Ok(log
            .entries
            .iter()
            .filter(|n| after.map_or(true, |seq| n.sequence > seq))
            .cloned()
            .collect())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for AppState<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry", &self.registry)
            .field("port", &self.port)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
