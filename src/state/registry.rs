//! Registry of configured timers and their runtime state

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::{
    clock::{Clock, SystemClock},
    timer_config::TimerConfig,
    timer_state::{TimerState, TimerStatus},
    Tone,
};
use crate::error::{Result, TimerError};

/// Outcome of a `configure` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigureOutcome {
    /// Name, duration and tone were all applied
    Applied,
    /// The timer is running, so only the name was applied
    NameOnly,
}

/// Read-only view of one timer at a given instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub index: usize,
    pub name: String,
    pub tone: Tone,
    pub duration_seconds: f64,
    pub status: TimerStatus,
    pub remaining_seconds: f64,
    pub progress: f64,
    pub display: String,
}

#[derive(Debug, Clone)]
struct TimerSlot {
    config: TimerConfig,
    state: TimerState,
}

/// Authoritative state of every configured timer.
///
/// Registries are plain values; any number of them can coexist. All
/// operations are synchronous and never block.
#[derive(Debug)]
pub struct TimerRegistry<C: Clock = SystemClock> {
    slots: Vec<TimerSlot>,
    active_count: usize,
    clock: C,
}

impl TimerRegistry<SystemClock> {
    /// Create a registry on the system clock
    pub fn new(configs: Vec<TimerConfig>) -> Result<Self> {
        Self::with_clock(configs, SystemClock)
    }
}

impl<C: Clock> TimerRegistry<C> {
    /// Create a registry with every given config active
    pub fn with_clock(configs: Vec<TimerConfig>, clock: C) -> Result<Self> {
        for config in &configs {
            config.validate()?;
        }
        let slots: Vec<TimerSlot> = configs
            .into_iter()
            .map(|config| TimerSlot {
                state: TimerState::ready(config.duration_seconds),
                config,
            })
            .collect();

        Ok(Self {
            active_count: slots.len(),
            slots,
            clock,
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current instant according to the registry's clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Number of active timers
    pub fn len(&self) -> usize {
        self.active_count
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Number of configured slots, active or hidden
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Result<&TimerSlot> {
        if index >= self.active_count {
            return Err(TimerError::UnknownTimer { index });
        }
        Ok(&self.slots[index])
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut TimerSlot> {
        if index >= self.active_count {
            return Err(TimerError::UnknownTimer { index });
        }
        Ok(&mut self.slots[index])
    }

    /// Change how many of the configured slots are active.
    ///
    /// Slots that become hidden are reset so nothing keeps counting unobserved.
    pub fn set_active_count(&mut self, count: usize) -> Result<()> {
        if count == 0 || count > self.slots.len() {
            return Err(TimerError::InvalidTimerCount {
                count,
                max: self.slots.len(),
            });
        }
        for slot in self.slots.iter_mut().skip(count) {
            slot.state.reset(slot.config.duration_seconds);
        }
        info!("Active timer count set to {} (was {})", count, self.active_count);
        self.active_count = count;
        Ok(())
    }

    pub fn config(&self, index: usize) -> Result<&TimerConfig> {
        self.slot(index).map(|slot| &slot.config)
    }

    pub fn state(&self, index: usize) -> Result<&TimerState> {
        self.slot(index).map(|slot| &slot.state)
    }

    pub fn status(&self, index: usize) -> Result<TimerStatus> {
        self.slot(index).map(|slot| slot.state.status())
    }

    /// Replace a timer's settings.
    ///
    /// The config is validated before anything is applied. While the timer
    /// is running only the name changes.
    pub fn configure(&mut self, index: usize, config: TimerConfig) -> Result<ConfigureOutcome> {
        config.validate()?;
        let slot = self.slot_mut(index)?;

        if slot.state.is_running() {
            info!("Timer {} is running, updating name only", index);
            slot.config.name = config.name;
            return Ok(ConfigureOutcome::NameOnly);
        }

        slot.state.set_duration(config.duration_seconds);
        slot.config = config;
        info!(
            "Configured timer {}: {:?}, {}s, {}",
            index, slot.config.name, slot.config.duration_seconds, slot.config.tone
        );
        Ok(ConfigureOutcome::Applied)
    }

    /// Start a timer from its full configured duration. No-op if already running.
    pub fn start(&mut self, index: usize) -> Result<()> {
        let now = self.clock.now();
        let slot = self.slot_mut(index)?;
        if slot.state.start(slot.config.duration_seconds, now) {
            info!("Started timer {} ({:?})", index, slot.config.name);
        }
        Ok(())
    }

    /// Stop a running timer. No-op otherwise.
    pub fn stop(&mut self, index: usize) -> Result<()> {
        let slot = self.slot_mut(index)?;
        if slot.state.stop() {
            info!("Stopped timer {} ({:?})", index, slot.config.name);
        }
        Ok(())
    }

    /// Return a timer to Ready and re-arm its notification
    pub fn reset(&mut self, index: usize) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.state.reset(slot.config.duration_seconds);
        info!("Reset timer {} ({:?})", index, slot.config.name);
        Ok(())
    }

    /// Start every visible timer that is not already running, all at the same instant
    pub fn start_all(&mut self) {
        let now = self.clock.now();
        let mut started = 0;
        for slot in &mut self.slots[..self.active_count] {
            if slot.state.start(slot.config.duration_seconds, now) {
                started += 1;
            }
        }
        info!("Started {} of {} timers", started, self.active_count);
    }

    pub fn stop_all(&mut self) {
        let mut stopped = 0;
        for slot in &mut self.slots[..self.active_count] {
            if slot.state.stop() {
                stopped += 1;
            }
        }
        info!("Stopped {} of {} timers", stopped, self.active_count);
    }

    pub fn reset_all(&mut self) {
        for slot in &mut self.slots[..self.active_count] {
            slot.state.reset(slot.config.duration_seconds);
        }
        info!("Reset all {} timers", self.active_count);
    }

    pub fn remaining_seconds(&self, index: usize, now: Instant) -> Result<f64> {
        self.slot(index).map(|slot| slot.state.remaining_seconds(now))
    }

    /// Finish every running timer whose countdown reached zero.
    ///
    /// Returns the indices that finished during this call, in ascending
    /// order. A timer is reported once per run.
    pub fn tick(&mut self, now: Instant) -> Vec<usize> {
        let finished: Vec<usize> = self.slots[..self.active_count]
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.state.finish_if_elapsed(now).then_some(index))
            .collect();

        for &index in &finished {
            info!("Timer {} ({:?}) finished", index, self.slots[index].config.name);
        }
        debug!("Tick: {} running, {} newly finished", self.running_count(), finished.len());
        finished
    }

    pub fn running_count(&self) -> usize {
        self.slots[..self.active_count]
            .iter()
            .filter(|slot| slot.state.is_running())
            .count()
    }

    pub fn view(&self, index: usize, now: Instant) -> Result<TimerView> {
        let slot = self.slot(index)?;
        let remaining = slot.state.remaining_seconds(now);
        let duration = slot.state.duration_seconds();
        let progress = match slot.state.status() {
            TimerStatus::Ready => 0.0,
            _ => (1.0 - remaining / duration).clamp(0.0, 1.0),
        };

        Ok(TimerView {
            index,
            name: slot.config.name.clone(),
            tone: slot.config.tone,
            duration_seconds: duration,
            status: slot.state.status(),
            remaining_seconds: remaining,
            progress,
            display: format_clock(remaining),
        })
    }

    /// Views of every active timer
    pub fn snapshot(&self, now: Instant) -> Vec<TimerView> {
        (0..self.active_count)
            .filter_map(|index| self.view(index, now).ok())
            .collect()
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(seconds: f64) -> String {
    if seconds <= 0.0 || !seconds.is_finite() {
        return "00:00".to_string();
    }
    let whole = seconds as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
