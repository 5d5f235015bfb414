//! Tests for TimerRegistry
//!
//! Time is driven by a manual clock so every countdown is exact.

use std::time::{Duration, Instant};

use super::{
    presets, Clock, ConfigureOutcome, ManualClock, TimerConfig, TimerRegistry, TimerStatus, Tone,
};
use crate::error::TimerError;

fn registry_with(configs: Vec<TimerConfig>) -> (TimerRegistry<ManualClock>, ManualClock, Instant) {
    let clock = ManualClock::new();
    let t0 = clock.now();
    let registry = TimerRegistry::with_clock(configs, clock.clone()).unwrap();
    (registry, clock, t0)
}

fn at(t0: Instant, seconds: f64) -> Instant {
    t0 + Duration::from_secs_f64(seconds)
}

#[test]
fn test_countdown_scenario() {
    let (mut registry, _clock, t0) = registry_with(presets::exam_timers());

    registry.configure(0, TimerConfig::new("Quiz", 15.0, Tone::A4)).unwrap();
    registry.start(0).unwrap();

    assert_eq!(registry.remaining_seconds(0, at(t0, 10.0)).unwrap(), 5.0);

    let finished = registry.tick(at(t0, 16.0));
    assert_eq!(finished, vec![0]);
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Finished);
    assert_eq!(registry.remaining_seconds(0, at(t0, 16.0)).unwrap(), 0.0);
}

#[test]
fn test_remaining_right_after_start_is_full_duration() {
    let (mut registry, _clock, t0) = registry_with(presets::full_palette());
    registry.start_all();

    for index in 0..registry.len() {
        let duration = registry.config(index).unwrap().duration_seconds;
        assert_eq!(registry.remaining_seconds(index, t0).unwrap(), duration);
    }
}

#[test]
fn test_remaining_never_increases_while_running() {
    let (mut registry, _clock, t0) = registry_with(presets::exam_timers());
    registry.start(2).unwrap();

    let mut previous = f64::INFINITY;
    for step in 0..200 {
        let remaining = registry.remaining_seconds(2, at(t0, step as f64 * 30.0)).unwrap();
        assert!(remaining <= previous);
        assert!(remaining >= 0.0);
        previous = remaining;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn test_tick_reports_each_run_once() {
    let (mut registry, _clock, t0) = registry_with(vec![
        TimerConfig::new("short", 5.0, Tone::A4),
        TimerConfig::new("long", 50.0, Tone::C5),
    ]);
    registry.start_all();

    assert!(registry.tick(at(t0, 1.0)).is_empty());
    assert_eq!(registry.tick(at(t0, 6.0)), vec![0]);
    assert!(registry.tick(at(t0, 7.0)).is_empty());
    assert!(registry.tick(at(t0, 8.0)).is_empty());
    assert_eq!(registry.tick(at(t0, 60.0)), vec![1]);
    assert!(registry.tick(at(t0, 61.0)).is_empty());
}

#[test]
fn test_tick_reports_simultaneous_finishes_in_order() {
    let (mut registry, _clock, t0) = registry_with(vec![
        TimerConfig::new("a", 10.0, Tone::A4),
        TimerConfig::new("b", 20.0, Tone::A4),
        TimerConfig::new("c", 5.0, Tone::A4),
    ]);
    registry.start_all();

    assert_eq!(registry.tick(at(t0, 30.0)), vec![0, 1, 2]);
}

#[test]
fn test_reset_then_start_restores_full_countdown() {
    let (mut registry, clock, t0) = registry_with(vec![TimerConfig::new("t", 15.0, Tone::A4)]);
    registry.start(0).unwrap();
    registry.tick(at(t0, 20.0));
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Finished);

    clock.advance_secs(100.0);
    registry.reset(0).unwrap();
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Ready);
    assert!(registry.state(0).unwrap().started_at().is_none());

    registry.start(0).unwrap();
    let restart = at(t0, 100.0);
    assert_eq!(registry.remaining_seconds(0, restart).unwrap(), 15.0);
    assert_eq!(registry.remaining_seconds(0, at(t0, 110.0)).unwrap(), 5.0);

    // The notification is re-armed for the new run
    assert!(registry.tick(at(t0, 114.0)).is_empty());
    assert_eq!(registry.tick(at(t0, 115.0)), vec![0]);
}

#[test]
fn test_start_is_noop_while_running() {
    let (mut registry, clock, t0) = registry_with(vec![TimerConfig::new("t", 60.0, Tone::A4)]);
    registry.start(0).unwrap();
    clock.advance_secs(20.0);
    registry.start(0).unwrap();

    assert_eq!(registry.state(0).unwrap().started_at(), Some(t0));
    assert_eq!(registry.remaining_seconds(0, at(t0, 20.0)).unwrap(), 40.0);
}

#[test]
fn test_start_after_finish_begins_new_run() {
    let (mut registry, clock, t0) = registry_with(vec![TimerConfig::new("t", 10.0, Tone::A4)]);
    registry.start(0).unwrap();
    assert_eq!(registry.tick(at(t0, 10.0)), vec![0]);

    clock.advance_secs(12.0);
    registry.start(0).unwrap();
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Running);
    assert_eq!(registry.remaining_seconds(0, at(t0, 17.0)).unwrap(), 5.0);
    assert_eq!(registry.tick(at(t0, 22.0)), vec![0]);
}

#[test]
fn test_stop_then_start_counts_from_full_duration() {
    let (mut registry, clock, t0) = registry_with(vec![TimerConfig::new("t", 60.0, Tone::A4)]);
    registry.start(0).unwrap();
    clock.advance_secs(25.0);

    registry.stop(0).unwrap();
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Ready);
    assert_eq!(registry.remaining_seconds(0, at(t0, 40.0)).unwrap(), 60.0);
    assert!(registry.tick(at(t0, 500.0)).is_empty());

    clock.advance_secs(15.0);
    registry.start(0).unwrap();
    assert_eq!(registry.remaining_seconds(0, at(t0, 40.0)).unwrap(), 60.0);
    assert_eq!(registry.remaining_seconds(0, at(t0, 70.0)).unwrap(), 30.0);
}

#[test]
fn test_stop_does_not_touch_finished_timer() {
    let (mut registry, _clock, t0) = registry_with(vec![TimerConfig::new("t", 1.0, Tone::A4)]);
    registry.start(0).unwrap();
    registry.tick(at(t0, 2.0));
    registry.stop(0).unwrap();
    assert_eq!(registry.status(0).unwrap(), TimerStatus::Finished);
}

#[test]
fn test_configure_rejects_invalid_duration() {
    let (mut registry, _clock, _t0) = registry_with(presets::exam_timers());
    let before = registry.config(0).unwrap().clone();

    let result = registry.configure(0, TimerConfig::new("Changed", -5.0, Tone::E6));
    assert!(matches!(result, Err(TimerError::InvalidDuration { seconds, .. }) if seconds == -5.0));
    assert_eq!(registry.config(0).unwrap(), &before);
}

#[test]
fn test_configure_rejects_invalid_duration_while_running() {
    let (mut registry, _clock, _t0) = registry_with(presets::exam_timers());
    registry.start(0).unwrap();

    let result = registry.configure(0, TimerConfig::new("Renamed", f64::NAN, Tone::A4));
    assert!(matches!(result, Err(TimerError::InvalidDuration { .. })));
    assert_eq!(registry.config(0).unwrap().name, "Standard Time");
}

#[test]
fn test_configure_while_running_only_renames() {
    let (mut registry, _clock, t0) = registry_with(vec![TimerConfig::new("Exam", 60.0, Tone::A4)]);
    registry.start(0).unwrap();

    let outcome = registry.configure(0, TimerConfig::new("Exam (room 2)", 30.0, Tone::E6)).unwrap();
    assert_eq!(outcome, ConfigureOutcome::NameOnly);

    let config = registry.config(0).unwrap();
    assert_eq!(config.name, "Exam (room 2)");
    assert_eq!(config.duration_seconds, 60.0);
    assert_eq!(config.tone, Tone::A4);
    assert_eq!(registry.remaining_seconds(0, at(t0, 40.0)).unwrap(), 20.0);
}

#[test]
fn test_configure_while_ready_updates_snapshot() {
    let (mut registry, _clock, t0) = registry_with(vec![TimerConfig::new("Exam", 60.0, Tone::A4)]);

    let outcome = registry.configure(0, TimerConfig::new("Exam", 30.0, Tone::G5)).unwrap();
    assert_eq!(outcome, ConfigureOutcome::Applied);
    assert_eq!(registry.remaining_seconds(0, t0).unwrap(), 30.0);
    assert_eq!(registry.config(0).unwrap().tone, Tone::G5);
}

#[test]
fn test_unknown_index_fails_everywhere() {
    let (mut registry, _clock, t0) = registry_with(presets::exam_timers());
    let unknown = TimerError::UnknownTimer { index: 4 };

    assert_eq!(registry.start(4), Err(unknown.clone()));
    assert_eq!(registry.stop(4), Err(unknown.clone()));
    assert_eq!(registry.reset(4), Err(unknown.clone()));
    assert_eq!(registry.remaining_seconds(4, t0), Err(unknown.clone()));
    assert_eq!(registry.view(4, t0), Err(unknown.clone()));
    assert_eq!(
        registry.configure(4, TimerConfig::new("x", 10.0, Tone::A4)),
        Err(unknown)
    );
}

#[test]
fn test_group_operations() {
    let (mut registry, clock, _t0) = registry_with(presets::exam_timers());

    registry.start_all();
    assert_eq!(registry.running_count(), 4);

    clock.advance_secs(10.0);
    registry.stop_all();
    assert_eq!(registry.running_count(), 0);
    assert!((0..4).all(|i| registry.status(i).unwrap() == TimerStatus::Ready));

    registry.start(1).unwrap();
    registry.reset_all();
    assert!((0..4).all(|i| registry.state(i).unwrap().started_at().is_none()));
}

#[test]
fn test_start_all_leaves_running_timers_alone() {
    let (mut registry, clock, t0) = registry_with(presets::exam_timers());
    registry.start(0).unwrap();
    clock.advance_secs(30.0);
    registry.start_all();

    assert_eq!(registry.state(0).unwrap().started_at(), Some(t0));
    assert_eq!(registry.state(1).unwrap().started_at(), Some(at(t0, 30.0)));
}

#[test]
fn test_group_operations_only_touch_visible_timers() {
    let (mut registry, clock, t0) = registry_with(presets::full_palette());
    registry.set_active_count(2).unwrap();

    registry.configure(0, TimerConfig::new("short", 5.0, Tone::A4)).unwrap();
    registry.start_all();
    clock.advance_secs(6.0);
    assert_eq!(registry.tick(clock.now()), vec![0]);

    // Finished timers begin a new run, running ones keep theirs
    registry.start_all();
    assert_eq!(registry.state(0).unwrap().started_at(), Some(at(t0, 6.0)));
    assert_eq!(registry.state(1).unwrap().started_at(), Some(t0));

    registry.stop_all();
    registry.set_active_count(6).unwrap();
    assert_eq!(registry.running_count(), 0);
    assert!((2..6).all(|i| registry.state(i).unwrap().started_at().is_none()));

    registry.set_active_count(2).unwrap();
    registry.start_all();
    registry.set_active_count(6).unwrap();
    assert_eq!(registry.running_count(), 2);
    registry.reset_all();
    assert!((0..6).all(|i| registry.status(i).unwrap() == TimerStatus::Ready));
}

#[test]
fn test_active_count_hides_and_resets_slots() {
    let (mut registry, _clock, t0) = registry_with(presets::full_palette());
    registry.start_all();
    assert_eq!(registry.running_count(), 6);

    registry.set_active_count(4).unwrap();
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.capacity(), 6);
    assert_eq!(registry.running_count(), 4);
    assert_eq!(registry.start(5), Err(TimerError::UnknownTimer { index: 5 }));
    assert_eq!(registry.snapshot(t0).len(), 4);

    registry.set_active_count(6).unwrap();
    assert_eq!(registry.status(5).unwrap(), TimerStatus::Ready);

    assert_eq!(
        registry.set_active_count(0),
        Err(TimerError::InvalidTimerCount { count: 0, max: 6 })
    );
    assert!(registry.set_active_count(7).is_err());
}

#[test]
fn test_view_reports_progress_and_clock() {
    let (mut registry, _clock, t0) = registry_with(vec![TimerConfig::from_minutes("Exam", 75.0, Tone::A4)]);

    let ready = registry.view(0, t0).unwrap();
    assert_eq!(ready.display, "75:00");
    assert_eq!(ready.progress, 0.0);
    assert_eq!(ready.status, TimerStatus::Ready);

    registry.start(0).unwrap();
    let running = registry.view(0, at(t0, 1125.0)).unwrap();
    assert_eq!(running.display, "56:15");
    assert_eq!(running.progress, 0.25);

    registry.tick(at(t0, 4500.0));
    let finished = registry.view(0, at(t0, 4600.0)).unwrap();
    assert_eq!(finished.display, "00:00");
    assert_eq!(finished.progress, 1.0);
}

#[test]
fn test_registries_are_independent() {
    let (mut first, _c1, _t1) = registry_with(presets::exam_timers());
    let (second, _c2, _t2) = registry_with(presets::exam_timers());

    first.start_all();
    assert_eq!(first.running_count(), 4);
    assert_eq!(second.running_count(), 0);
}

#[test]
fn test_construction_validates_configs() {
    let result = TimerRegistry::new(vec![TimerConfig::new("", 10.0, Tone::A4)]);
    assert_eq!(result.err(), Some(TimerError::InvalidName));
}

#[test]
fn test_format_clock() {
    use super::format_clock;

    assert_eq!(format_clock(0.0), "00:00");
    assert_eq!(format_clock(-3.0), "00:00");
    assert_eq!(format_clock(59.9), "00:59");
    assert_eq!(format_clock(4875.0), "81:15");
}
