//! Simulation module
//!
//! All gameplay logic lives here:
//! - Ghost lifecycle (spawn, motion, fade, capture)
//! - Difficulty curve
//! - Spawn timer
//!
//! Randomness comes from the caller's RNG only; no rendering or platform
//! dependencies.

pub mod difficulty;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use difficulty::{GameSettings, level_for_score, points_for_capture, settings_for_level};
pub use motion::{fade_at, redirect_chance};
pub use spawn::{spawn_ghost, spawn_particle_burst};
pub use state::{
    EntityId, FadePhase, GamePhase, GameState, Ghost, Particle, ParticleColor, Viewport,
};
pub use tick::{Capture, TickOutcome, capture, tick, try_spawn_ghost};
pub use timer::SpawnTimer;
