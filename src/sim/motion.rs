//! Entity updater
//!
//! Advances one ghost or particle by a time step: integrate, bounce off the
//! viewport edges, random redirection, and the age-driven fade timeline.

use glam::Vec2;
use rand::Rng;

use super::state::{FadePhase, Ghost, Particle, Viewport};
use crate::consts::*;
use crate::settings::RedirectMode;

/// Opacity and phase for a ghost of the given age (ms).
///
/// Fade in over the first 150 ms, hold at 1, then fade out over the last
/// 400 ms of `lifespan_ms`.
pub fn fade_at(age_ms: f64, lifespan_ms: f64) -> (f32, FadePhase) {
    let fade_out_start = lifespan_ms - FADE_OUT_MS;
    if age_ms < FADE_IN_MS {
        let opacity = (age_ms / FADE_IN_MS).clamp(0.0, 1.0);
        (opacity as f32, FadePhase::FadingIn)
    } else if age_ms > fade_out_start {
        let progress = (age_ms - fade_out_start) / FADE_OUT_MS;
        ((1.0 - progress).clamp(0.0, 1.0) as f32, FadePhase::FadingOut)
    } else {
        (1.0, FadePhase::Visible)
    }
}

/// Chance of a random heading change during a step of `dt` seconds
pub fn redirect_chance(mode: RedirectMode, dt: f32) -> f64 {
    match mode {
        RedirectMode::Disabled => 0.0,
        RedirectMode::PerFrame => REDIRECT_CHANCE,
        RedirectMode::TimeScaled => {
            let frames = (dt.max(0.0) as f64) * REFERENCE_FPS;
            1.0 - (1.0 - REDIRECT_CHANCE).powf(frames)
        }
    }
}

/// Flip one direction component on an outward edge crossing, jitter the
/// other, and pull the coordinate back inside.
///
/// An axis with no room (viewport no larger than the ghost) only clamps.
/// Returns true when a bounce happened.
fn bounce_axis<R: Rng + ?Sized>(
    pos: &mut f32,
    dir: &mut f32,
    other_dir: &mut f32,
    max: f32,
    rng: &mut R,
) -> bool {
    let outward = max > 0.0 && ((*pos <= 0.0 && *dir < 0.0) || (*pos >= max && *dir > 0.0));
    if outward {
        *dir = -*dir;
        *other_dir += rng.random_range(-BOUNCE_JITTER..=BOUNCE_JITTER);
    }
    *pos = pos.clamp(0.0, max);
    outward
}

impl Ghost {
    /// Advance by `dt` seconds; `now_ms` is the session clock used for the
    /// fade timeline.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        now_ms: f64,
        viewport: Viewport,
        redirect: RedirectMode,
        rng: &mut R,
    ) {
        self.pos += self.direction * self.speed * dt;

        let max = viewport.max_corner(self.size);
        if bounce_axis(&mut self.pos.x, &mut self.direction.x, &mut self.direction.y, max.x, rng) {
            self.direction = self.direction.normalize_or(Vec2::X);
        }
        if bounce_axis(&mut self.pos.y, &mut self.direction.y, &mut self.direction.x, max.y, rng) {
            self.direction = self.direction.normalize_or(Vec2::Y);
        }

        if rng.random_bool(redirect_chance(redirect, dt).clamp(0.0, 1.0)) {
            let angle = rng.random_range(-REDIRECT_MAX_ANGLE..=REDIRECT_MAX_ANGLE);
            self.direction = Vec2::from_angle(angle)
                .rotate(self.direction)
                .normalize_or(Vec2::X);
        }

        let (opacity, fade) = fade_at(now_ms - self.created_at, self.lifespan_ms);
        self.opacity = opacity;
        self.fade = fade;
    }
}

impl Particle {
    /// Drift and burn down life; life never goes below 0
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life = (self.life - dt * PARTICLE_DECAY_RATE).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ParticleColor;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn ghost(pos: Vec2, direction: Vec2) -> Ghost {
        Ghost {
            id: 1,
            pos,
            size: 50.0,
            speed: 200.0,
            opacity: 0.0,
            captured: false,
            fade: FadePhase::FadingIn,
            direction,
            created_at: 0.0,
            lifespan_ms: GHOST_LIFESPAN_MS,
        }
    }

    #[test]
    fn test_fade_timeline() {
        let life = GHOST_LIFESPAN_MS;
        assert_eq!(fade_at(0.0, life), (0.0, FadePhase::FadingIn));
        let (o, phase) = fade_at(75.0, life);
        assert!((o - 0.5).abs() < 1e-6);
        assert_eq!(phase, FadePhase::FadingIn);
        assert_eq!(fade_at(150.0, life), (1.0, FadePhase::Visible));
        assert_eq!(fade_at(1000.0, life), (1.0, FadePhase::Visible));
        assert_eq!(fade_at(1600.0, life), (1.0, FadePhase::Visible));

        let (o, phase) = fade_at(1800.0, life);
        assert!((o - 0.5).abs() < 1e-6);
        assert_eq!(phase, FadePhase::FadingOut);
        assert_eq!(fade_at(2000.0, life), (0.0, FadePhase::FadingOut));
        assert_eq!(fade_at(5000.0, life), (0.0, FadePhase::FadingOut));
    }

    #[test]
    fn test_fade_is_clamped_for_negative_age() {
        assert_eq!(fade_at(-10.0, GHOST_LIFESPAN_MS), (0.0, FadePhase::FadingIn));
    }

    #[test]
    fn test_ghost_lifecycle_opacity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut g = ghost(Vec2::new(300.0, 300.0), Vec2::X);
        g.speed = 0.0;

        g.advance(0.0, 0.0, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
        assert_eq!(g.opacity, 0.0);
        assert!(!g.is_expired());

        g.advance(0.0, 150.0, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
        assert!((g.opacity - 1.0).abs() < 1e-6);

        g.advance(0.0, 1000.0, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
        assert_eq!(g.opacity, 1.0);
        assert_eq!(g.fade, FadePhase::Visible);

        let mut last = 1.0;
        for t in [1700.0, 1800.0, 1900.0] {
            g.advance(0.0, t, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
            assert!(g.opacity < last);
            last = g.opacity;
        }
        assert!(!g.is_expired());

        g.advance(0.0, 2000.0, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
        assert!(g.is_expired());
    }

    #[test]
    fn test_integrates_position() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut g = ghost(Vec2::new(100.0, 100.0), Vec2::X);
        g.advance(0.5, 0.0, VIEWPORT, RedirectMode::PerFrame, &mut rng);
        // Redirect only changes heading, not the step already taken
        assert!((g.pos.x - 200.0).abs() < 1e-3);
        assert!((g.pos.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_bounce_per_crossing() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut g = ghost(Vec2::new(0.0, 300.0), Vec2::new(-1.0, 0.0));

        g.advance(1.0 / 60.0, 0.0, VIEWPORT, RedirectMode::Disabled, &mut rng);
        assert!(g.direction.x > 0.0, "should head back inside");
        assert_eq!(g.pos.x, 0.0);

        for _ in 0..10 {
            let before = g.direction.x.signum();
            g.advance(1.0 / 60.0, 0.0, VIEWPORT, RedirectMode::Disabled, &mut rng);
            assert_eq!(g.direction.x.signum(), before, "no bounce loop");
            assert!(g.pos.x > 0.0);
        }
    }

    #[test]
    fn test_no_room_axis_only_clamps() {
        let mut rng = Pcg32::seed_from_u64(11);
        let narrow = Viewport::new(20.0, 600.0);
        let mut g = ghost(Vec2::new(0.0, 300.0), Vec2::X);

        for frame in 1..=10 {
            g.advance(1.0 / 60.0, frame as f64 * 16.0, narrow, RedirectMode::Disabled, &mut rng);
            assert_eq!(g.pos.x, 0.0);
            assert_eq!(g.direction, Vec2::X);
        }
    }

    #[test]
    fn test_far_edge_bounce() {
        let mut rng = Pcg32::seed_from_u64(5);
        let max_x = VIEWPORT.width - 50.0;
        let mut g = ghost(Vec2::new(max_x, 300.0), Vec2::X);
        g.advance(0.01, 0.0, VIEWPORT, RedirectMode::TimeScaled, &mut rng);
        assert!(g.direction.x < 0.0);
        assert!(g.pos.x <= max_x);
        assert!((g.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ghost_at_edge_moving_inward_does_not_bounce() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut g = ghost(Vec2::new(0.0, 300.0), Vec2::X);
        g.speed = 0.0;
        g.advance(0.0, 0.0, VIEWPORT, RedirectMode::PerFrame, &mut rng);
        assert!(g.direction.x > 0.0);
    }

    #[test]
    fn test_direction_stays_unit_length() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut g = ghost(Vec2::new(10.0, 10.0), Vec2::new(-0.6, -0.8));
        g.speed = 900.0;
        for frame in 0..2000 {
            g.advance(1.0 / 30.0, frame as f64 * 33.3, VIEWPORT, RedirectMode::PerFrame, &mut rng);
            assert!((g.direction.length() - 1.0).abs() < 1e-4);
            assert!((0.0..=1.0).contains(&g.opacity));
            assert!(g.pos.x >= 0.0 && g.pos.x <= VIEWPORT.width - g.size);
            assert!(g.pos.y >= 0.0 && g.pos.y <= VIEWPORT.height - g.size);
        }
    }

    #[test]
    fn test_redirect_chance() {
        assert_eq!(redirect_chance(RedirectMode::PerFrame, 1.0), REDIRECT_CHANCE);
        assert_eq!(redirect_chance(RedirectMode::Disabled, 1.0), 0.0);
        assert_eq!(redirect_chance(RedirectMode::TimeScaled, 0.0), 0.0);
        let at_60 = redirect_chance(RedirectMode::TimeScaled, 1.0 / 60.0);
        assert!((at_60 - REDIRECT_CHANCE).abs() < 1e-9);
        // Slower frames get a proportionally higher chance
        assert!(redirect_chance(RedirectMode::TimeScaled, 1.0 / 30.0) > at_60);
    }

    #[test]
    fn test_particle_decay() {
        let mut p = Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::new(100.0, -50.0),
            life: 1.0,
            color: ParticleColor::Jade,
        };
        p.advance(0.25);
        assert_eq!(p.pos, Vec2::new(25.0, -12.5));
        assert!((p.life - 0.5).abs() < 1e-6);
        assert!(!p.is_dead());

        p.advance(1.0);
        assert_eq!(p.life, 0.0);
        assert!(p.is_dead());
    }
}
