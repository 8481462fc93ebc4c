//! Spawn timer
//!
//! Ghost spawning runs on its own cadence, separate from the frame tick. The
//! period depends on the level, so the timer is keyed by the level it was
//! armed for and is cancelled and re-armed whenever the level changes rather
//! than having its period edited in flight.

use std::collections::VecDeque;

use super::difficulty::GameSettings;
use crate::consts::{INITIAL_SPAWN_COUNT, INITIAL_SPAWN_STAGGER_MS};

#[derive(Debug, Clone)]
struct Armed {
    level: u32,
    interval_ms: f64,
    next_due_ms: f64,
}

/// Cancellable periodic spawn trigger, polled with the session clock
#[derive(Debug, Clone, Default)]
pub struct SpawnTimer {
    armed: Option<Armed>,
    /// One-shot spawns queued at session start
    pending: VecDeque<f64>,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the staggered opening spawns: up to 3, 200 ms apart, the first
    /// one immediately.
    pub fn schedule_opening(&mut self, settings: &GameSettings, now_ms: f64) {
        let count = INITIAL_SPAWN_COUNT.min(settings.max_ghosts);
        self.pending = (0..count)
            .map(|i| now_ms + i as f64 * INITIAL_SPAWN_STAGGER_MS)
            .collect();
    }

    /// Cancel any periodic schedule and start a fresh one for `level`
    pub fn arm(&mut self, level: u32, settings: &GameSettings, now_ms: f64) {
        let interval_ms = settings.spawn_interval_ms.max(1.0);
        self.armed = Some(Armed {
            level,
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        });
    }

    /// Drop the periodic schedule and any queued opening spawns
    pub fn cancel(&mut self) {
        self.armed = None;
        self.pending.clear();
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Level the periodic schedule was armed for
    pub fn armed_level(&self) -> Option<u32> {
        self.armed.as_ref().map(|a| a.level)
    }

    pub fn interval_ms(&self) -> Option<f64> {
        self.armed.as_ref().map(|a| a.interval_ms)
    }

    /// Number of spawn attempts due at `now_ms`.
    ///
    /// Opening spawns fire as they come due. The periodic schedule fires at
    /// most once per poll; a long stall does not produce a burst.
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let mut due = 0;
        while self.pending.front().is_some_and(|&t| t <= now_ms) {
            self.pending.pop_front();
            due += 1;
        }

        if let Some(armed) = self.armed.as_mut() {
            if now_ms >= armed.next_due_ms {
                due += 1;
                armed.next_due_ms += armed.interval_ms;
                if armed.next_due_ms <= now_ms {
                    armed.next_due_ms = now_ms + armed.interval_ms;
                }
            }
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::settings_for_level;

    #[test]
    fn test_opening_spawns_are_staggered() {
        let mut timer = SpawnTimer::new();
        timer.schedule_opening(&settings_for_level(1), 1000.0);

        assert_eq!(timer.poll(1000.0), 1);
        assert_eq!(timer.poll(1100.0), 0);
        assert_eq!(timer.poll(1200.0), 1);
        assert_eq!(timer.poll(5000.0), 1);
        assert_eq!(timer.poll(6000.0), 0);
    }

    #[test]
    fn test_opening_capped_by_max_ghosts() {
        let mut settings = settings_for_level(1);
        settings.max_ghosts = 2;
        let mut timer = SpawnTimer::new();
        timer.schedule_opening(&settings, 0.0);
        assert_eq!(timer.poll(1000.0), 2);
    }

    #[test]
    fn test_periodic_cadence() {
        let settings = settings_for_level(1); // 520 ms
        let mut timer = SpawnTimer::new();
        timer.arm(1, &settings, 0.0);

        assert_eq!(timer.poll(519.0), 0);
        assert_eq!(timer.poll(520.0), 1);
        assert_eq!(timer.poll(600.0), 0);
        assert_eq!(timer.poll(1040.0), 1);
    }

    #[test]
    fn test_stall_fires_once() {
        let mut timer = SpawnTimer::new();
        timer.arm(1, &settings_for_level(1), 0.0);
        assert_eq!(timer.poll(10_000.0), 1);
        assert_eq!(timer.poll(10_100.0), 0);
        assert_eq!(timer.poll(10_520.0), 1);
    }

    #[test]
    fn test_rearm_replaces_schedule() {
        let mut timer = SpawnTimer::new();
        timer.arm(1, &settings_for_level(1), 0.0);
        timer.arm(3, &settings_for_level(3), 400.0);

        assert_eq!(timer.armed_level(), Some(3));
        assert_eq!(timer.interval_ms(), Some(360.0));
        // Old 520 ms deadline is gone
        assert_eq!(timer.poll(520.0), 0);
        assert_eq!(timer.poll(760.0), 1);
    }

    #[test]
    fn test_cancel_stops_everything() {
        let mut timer = SpawnTimer::new();
        timer.schedule_opening(&settings_for_level(1), 0.0);
        timer.arm(1, &settings_for_level(1), 0.0);
        timer.cancel();

        assert!(!timer.is_armed());
        assert_eq!(timer.poll(100_000.0), 0);
    }
}
