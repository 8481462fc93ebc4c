//! Entity factory
//!
//! Builds ghosts and capture bursts with randomized initial state. The RNG is
//! passed in so sessions and tests stay reproducible.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::difficulty::GameSettings;
use super::state::{EntityId, FadePhase, Ghost, Particle, ParticleColor, Viewport};
use crate::consts::*;

/// Usable spawn range along one axis. Small or broken viewports fall back to
/// `MIN_SPAWN_RANGE` so coordinates stay finite and non-negative.
fn spawn_range(extent: f32, size: f32) -> f32 {
    let range = (extent - size - SPAWN_MARGIN).max(MIN_SPAWN_RANGE);
    if range.is_finite() { range } else { MIN_SPAWN_RANGE }
}

/// Create a ghost at a random position with a random heading.
///
/// The ghost starts invisible and fading in; its speed is the nominal speed
/// scaled by a factor in `[1.2, 2.0]`.
pub fn spawn_ghost<R: Rng + ?Sized>(
    id: EntityId,
    settings: &GameSettings,
    viewport: Viewport,
    now_ms: f64,
    lifespan_ms: f64,
    rng: &mut R,
) -> Ghost {
    let size = settings.ghost_size;
    let x = rng.random::<f32>() * spawn_range(viewport.width, size) + SPAWN_MARGIN;
    let y = rng.random::<f32>() * spawn_range(viewport.height, size) + SPAWN_MARGIN;

    let angle = rng.random_range(0.0..TAU);
    let speed_factor = rng.random_range(SPAWN_SPEED_FACTOR_MIN..=SPAWN_SPEED_FACTOR_MAX);

    Ghost {
        id,
        pos: Vec2::new(x, y),
        size,
        speed: settings.ghost_speed * speed_factor,
        opacity: 0.0,
        captured: false,
        fade: FadePhase::FadingIn,
        direction: Vec2::from_angle(angle),
        created_at: now_ms,
        lifespan_ms,
    }
}

/// Create the fixed-size particle burst shown when a ghost is caught
pub fn spawn_particle_burst<R: Rng + ?Sized>(
    origin: Vec2,
    mut next_id: impl FnMut() -> EntityId,
    rng: &mut R,
) -> Vec<Particle> {
    (0..PARTICLE_BURST_COUNT)
        .map(|_| {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            );
            let color = ParticleColor::ALL[rng.random_range(0..ParticleColor::ALL.len())];
            Particle {
                id: next_id(),
                pos: origin,
                vel,
                life: 1.0,
                color,
            }
        })
        .collect()
}
