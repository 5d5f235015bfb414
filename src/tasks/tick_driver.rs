//! Tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, Clock, Notification};

/// Run one tick: finish elapsed timers and notify once for each.
///
/// The registry lock is released before any tone is synthesized. Each
/// notification carries its rendered tone, or no audio when rendering fails.
pub fn dispatch_tick<C: Clock>(state: &AppState<C>) -> Vec<Notification> {
    let finished = state.write(|registry| {
        let now = registry.now();
        registry
            .tick(now)
            .into_iter()
            .filter_map(|index| {
                let config = registry.config(index).ok()?;
                Some((index, config.name.clone(), config.tone))
            })
            .collect::<Vec<_>>()
    });

    let finished = match finished {
        Ok(finished) => finished,
        Err(e) => {
            error!("Failed to tick timers: {}", e);
            return Vec::new();
        }
    };

    finished
        .into_iter()
        .map(|(index, name, tone)| {
            let audio = match state.synthesizer.render(tone) {
                Ok(wav) => {
                    debug!("Rendered {} tone for timer {} ({} samples)", tone, index, wav.sample_count());
                    Some(wav.to_data_uri())
                }
                Err(e) => {
                    warn!("{} - falling back to visual notification for timer {}", e, index);
                    None
                }
            };
            state.push_notification(index, name, tone, audio)
        })
        .collect()
}

/// Background task that ticks the registry on a fixed cadence until shutdown.
///
/// Stopping the task leaves every timer as it is; running timers keep
/// counting against the clock and are caught up on the next tick.
pub async fn tick_driver_task<C>(state: Arc<AppState<C>>, period: Duration, mut shutdown: watch::Receiver<bool>)
where
    C: Clock + Send + 'static,
{
    info!("Starting tick driver every {:?}", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let notifications = dispatch_tick(&state);
                if !notifications.is_empty() {
                    info!("{} timer(s) finished this tick", notifications.len());
                }
            }

            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("Tick driver stopping");
                    break;
                }
            }
        }
    }
}
