//! Difficulty curve
//!
//! Level is a step function of score; every other knob is a clamped linear
//! function of level.

use serde::{Deserialize, Serialize};

use crate::consts::{POINTS_PER_CAPTURE, POINTS_PER_LEVEL};

const BASE_MAX_GHOSTS: u32 = 8;
const MAX_GHOSTS_CAP: u32 = 20;
const BASE_SPAWN_INTERVAL_MS: f64 = 600.0;
const SPAWN_INTERVAL_STEP_MS: f64 = 80.0;
const MIN_SPAWN_INTERVAL_MS: f64 = 200.0;
const BASE_GHOST_SIZE: f32 = 70.0;
const GHOST_SIZE_STEP: f32 = 3.0;
const MIN_GHOST_SIZE: f32 = 30.0;
const BASE_GHOST_SPEED: f32 = 150.0;
const GHOST_SPEED_STEP: f32 = 25.0;
const BASE_LIFESPAN_MS: f64 = 2000.0;
const LIFESPAN_STEP_MS: f64 = 80.0;
const MIN_LIFESPAN_MS: f64 = 1200.0;

/// Level-derived tuning, recomputed on demand and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub ghost_lifespan_ms: f64,
    /// Cap on concurrent live ghosts
    pub max_ghosts: usize,
    /// Spawn timer period
    pub spawn_interval_ms: f64,
    pub ghost_size: f32,
    /// Nominal speed (units/s) before the spawn multiplier
    pub ghost_speed: f32,
}

/// Difficulty parameters for a level
pub fn settings_for_level(level: u32) -> GameSettings {
    let lvl = level as f64;
    // floor(level / 1.5) == floor(2 * level / 3)
    let extra_ghosts = level.saturating_mul(2) / 3;

    GameSettings {
        ghost_lifespan_ms: (BASE_LIFESPAN_MS - lvl * LIFESPAN_STEP_MS).max(MIN_LIFESPAN_MS),
        max_ghosts: BASE_MAX_GHOSTS
            .saturating_add(extra_ghosts)
            .min(MAX_GHOSTS_CAP) as usize,
        spawn_interval_ms: (BASE_SPAWN_INTERVAL_MS - lvl * SPAWN_INTERVAL_STEP_MS)
            .max(MIN_SPAWN_INTERVAL_MS),
        ghost_size: (BASE_GHOST_SIZE - level as f32 * GHOST_SIZE_STEP).max(MIN_GHOST_SIZE),
        ghost_speed: BASE_GHOST_SPEED + level as f32 * GHOST_SPEED_STEP,
    }
}

/// Level for a score: +1 every 30 points, starting at 1
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Points for one capture. Flat on purpose; the level is accepted so the
/// reward can be tuned per level later.
pub fn points_for_capture(_level: u32) -> u32 {
    POINTS_PER_CAPTURE
}
