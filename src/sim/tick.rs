//! Simulation tick and capture
//!
//! `tick` is the per-frame transition: clock, level, entity updates, pruning,
//! then game-over detection, in that order. `capture` and `try_spawn_ghost`
//! are applied between ticks.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{level_for_score, points_for_capture};
use super::spawn::{spawn_ghost, spawn_particle_burst};
use super::state::{EntityId, GamePhase, GameState};
use crate::consts::GHOST_LIFESPAN_MS;
use crate::settings::GameConfig;

/// What a single tick changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Level went up this tick
    pub level_changed: bool,
    /// Time ran out this tick (Running -> Over)
    pub ended: bool,
    /// Ghosts removed (faded out or captured)
    pub ghosts_removed: usize,
}

/// A successful capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    pub ghost_id: EntityId,
    pub points: u32,
    /// Where the particle burst was spawned
    pub center: Vec2,
}

/// Advance the game state by `dt` seconds. No-op unless Running.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    dt: f32,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut R,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase != GamePhase::Running {
        return outcome;
    }

    state.time_left = (state.time_left - dt.max(0.0)).max(0.0);

    // Score never drops, but keep the level monotonic regardless
    let level = level_for_score(state.score).max(state.level);
    outcome.level_changed = level != state.level;
    state.level = level;

    let viewport = state.viewport;
    for ghost in &mut state.ghosts {
        ghost.advance(dt, now_ms, viewport, config.redirect, rng);
    }
    for particle in &mut state.particles {
        particle.advance(dt);
    }

    let before = state.ghosts.len();
    state.ghosts.retain(|g| !g.is_expired());
    outcome.ghosts_removed = before - state.ghosts.len();
    state.particles.retain(|p| !p.is_dead());

    if state.time_left <= 0.0 {
        state.phase = GamePhase::Over;
        outcome.ended = true;
    }

    outcome
}

/// Catch a ghost: mark it, add points, spawn a burst at its center.
///
/// Returns `None` (and changes nothing) if the session is not running or the
/// ghost is gone or already caught; a click racing the fade-out is expected.
pub fn capture<R: Rng + ?Sized>(
    state: &mut GameState,
    ghost_id: EntityId,
    rng: &mut R,
) -> Option<Capture> {
    if !state.is_running() {
        return None;
    }

    let ghost = state
        .ghosts
        .iter_mut()
        .find(|g| g.id == ghost_id && !g.captured)?;
    ghost.captured = true;
    let center = ghost.center();

    let points = points_for_capture(state.level);
    state.score = state.score.saturating_add(points);

    let burst = spawn_particle_burst(center, || state.next_entity_id(), rng);
    state.particles.extend(burst);

    Some(Capture {
        ghost_id,
        points,
        center,
    })
}

/// Spawn one ghost if the session is running and under the live-ghost cap
pub fn try_spawn_ghost<R: Rng + ?Sized>(
    state: &mut GameState,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut R,
) -> Option<EntityId> {
    if !state.is_running() {
        return None;
    }

    let settings = state.settings();
    if state.live_ghost_count() >= settings.max_ghosts {
        return None;
    }

    let lifespan_ms = if config.level_scaled_lifespan {
        settings.ghost_lifespan_ms
    } else {
        GHOST_LIFESPAN_MS
    };

    let id = state.next_entity_id();
    let ghost = spawn_ghost(id, &settings, state.viewport, now_ms, lifespan_ms, rng);
    state.ghosts.push(ghost);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Viewport;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> GameState {
        let mut state = GameState::new(Viewport::new(1280.0, 720.0), GAME_DURATION_SECS);
        state.start();
        state
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::default();
        let outcome = tick(&mut state, 1.0, 1000.0, &GameConfig::default(), &mut rng);
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state.time_left, GAME_DURATION_SECS);
    }

    #[test]
    fn test_tick_counts_down_and_clamps() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = GameConfig::default();
        let mut state = running_state();

        tick(&mut state, 0.5, 500.0, &config, &mut rng);
        assert!((state.time_left - 29.5).abs() < 1e-5);
        assert!(state.is_running());

        let outcome = tick(&mut state, 100.0, 100_500.0, &config, &mut rng);
        assert_eq!(state.time_left, 0.0);
        assert!(outcome.ended);
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_time_out_ends_even_with_live_ghosts() {
        let mut rng = Pcg32::seed_from_u64(2);
        let config = GameConfig::default();
        let mut state = running_state();
        for _ in 0..3 {
            try_spawn_ghost(&mut state, 0.0, &config, &mut rng);
        }
        state.time_left = 0.01;

        let outcome = tick(&mut state, 0.016, 16.0, &config, &mut rng);
        assert!(outcome.ended);
        assert!(state.is_over());
        assert_eq!(state.ghosts.len(), 3);
    }

    #[test]
    fn test_over_is_terminal() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = GameConfig::default();
        let mut state = running_state();
        try_spawn_ghost(&mut state, 0.0, &config, &mut rng);
        state.time_left = 0.0;
        tick(&mut state, 0.016, 16.0, &config, &mut rng);
        assert!(state.is_over());

        let snapshot_pos = state.ghosts[0].pos;
        let outcome = tick(&mut state, 0.5, 516.0, &config, &mut rng);
        assert!(!outcome.ended);
        assert_eq!(state.ghosts[0].pos, snapshot_pos);
        assert!(try_spawn_ghost(&mut state, 600.0, &config, &mut rng).is_none());
    }

    #[test]
    fn test_capture_scores_once() {
        let mut rng = Pcg32::seed_from_u64(4);
        let config = GameConfig::default();
        let mut state = running_state();
        let id = try_spawn_ghost(&mut state, 0.0, &config, &mut rng).unwrap();

        let first = capture(&mut state, id, &mut rng).unwrap();
        assert_eq!(first.points, POINTS_PER_CAPTURE);
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), PARTICLE_BURST_COUNT);
        assert_eq!(first.center, state.ghosts[0].center());

        assert!(capture(&mut state, id, &mut rng).is_none());
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), PARTICLE_BURST_COUNT);
    }

    #[test]
    fn test_capture_unknown_ghost_is_ignored() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = running_state();
        assert!(capture(&mut state, 999, &mut rng).is_none());
        assert_eq!(state.score, 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_captured_ghost_pruned_next_tick() {
        let mut rng = Pcg32::seed_from_u64(6);
        let config = GameConfig::default();
        let mut state = running_state();
        let id = try_spawn_ghost(&mut state, 0.0, &config, &mut rng).unwrap();
        capture(&mut state, id, &mut rng);

        let outcome = tick(&mut state, 0.016, 16.0, &config, &mut rng);
        assert_eq!(outcome.ghosts_removed, 1);
        assert!(state.ghost(id).is_none());
    }

    #[test]
    fn test_three_captures_reach_level_two() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = GameConfig::default();
        let mut state = running_state();
        assert_eq!((state.score, state.level, state.time_left), (0, 1, 30.0));

        for _ in 0..3 {
            let id = try_spawn_ghost(&mut state, 0.0, &config, &mut rng).unwrap();
            capture(&mut state, id, &mut rng).unwrap();
        }
        assert_eq!(state.score, 30);

        let outcome = tick(&mut state, 0.016, 16.0, &config, &mut rng);
        assert!(outcome.level_changed);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_ghost_fades_out_and_is_removed() {
        let mut rng = Pcg32::seed_from_u64(8);
        let config = GameConfig::default();
        let mut state = running_state();
        try_spawn_ghost(&mut state, 0.0, &config, &mut rng);

        let mut now: f64 = 0.0;
        while now < 1990.0 {
            now += 16.0;
            tick(&mut state, 0.016, now.min(1990.0), &config, &mut rng);
            assert_eq!(state.ghosts.len(), 1);
        }
        tick(&mut state, 0.016, 2000.0, &config, &mut rng);
        assert!(state.ghosts.is_empty());
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = GameConfig::default();
        let mut state = running_state();
        let cap = state.settings().max_ghosts;

        for _ in 0..cap {
            assert!(try_spawn_ghost(&mut state, 0.0, &config, &mut rng).is_some());
        }
        assert!(try_spawn_ghost(&mut state, 0.0, &config, &mut rng).is_none());
        assert_eq!(state.ghosts.len(), cap);
    }

    #[test]
    fn test_level_scaled_lifespan() {
        let mut rng = Pcg32::seed_from_u64(10);
        let config = GameConfig {
            level_scaled_lifespan: true,
            ..Default::default()
        };
        let mut state = running_state();
        let id = try_spawn_ghost(&mut state, 0.0, &config, &mut rng).unwrap();
        assert_eq!(state.ghost(id).unwrap().lifespan_ms, 1920.0);

        let id = try_spawn_ghost(&mut state, 0.0, &GameConfig::default(), &mut rng).unwrap();
        assert_eq!(state.ghost(id).unwrap().lifespan_ms, GHOST_LIFESPAN_MS);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(11);
        let config = GameConfig::default();
        let mut state = running_state();
        let id = try_spawn_ghost(&mut state, 0.0, &config, &mut rng).unwrap();
        capture(&mut state, id, &mut rng);

        tick(&mut state, 0.25, 250.0, &config, &mut rng);
        assert_eq!(state.particles.len(), PARTICLE_BURST_COUNT);
        tick(&mut state, 0.25, 500.0, &config, &mut rng);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs end identically
        let run = || {
            let mut rng = Pcg32::seed_from_u64(99999);
            let config = GameConfig::default();
            let mut state = running_state();
            for frame in 0..120 {
                let now = frame as f64 * 16.0;
                if frame % 20 == 0 {
                    try_spawn_ghost(&mut state, now, &config, &mut rng);
                }
                tick(&mut state, 0.016, now, &config, &mut rng);
            }
            state
        };

        let a = run();
        let b = run();
        assert_eq!(a.ghosts.len(), b.ghosts.len());
        for (ga, gb) in a.ghosts.iter().zip(&b.ghosts) {
            assert_eq!(ga.pos, gb.pos);
            assert_eq!(ga.direction, gb.direction);
        }
    }
}
