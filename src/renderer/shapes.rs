//! Draw list generation
//!
//! Converts a read-only view of the game into backend-neutral primitives.

use glam::Vec2;

use crate::game::RunSummary;
use crate::highscores::HighScores;
use crate::sim::state::{GamePhase, GameState, Ghost, Particle};

/// Background fill
pub const BACKGROUND: &str = "#1a1a2e";
/// Ghost body colour
pub const GHOST_COLOR: &str = "#f5f5ff";
/// HUD and overlay text colour
pub const TEXT_COLOR: &str = "#ffffff";
/// Accent for headings and the rank line
pub const ACCENT_COLOR: &str = "#f39c12";

/// Particle dot radius in pixels
const PARTICLE_RADIUS: f32 = 4.0;
/// Leaderboard rows shown on overlays
const OVERLAY_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Fill the whole viewport
    Clear { color: &'static str },
    /// Ghost sprite; `pos` is the top-left corner of its square
    Ghost { pos: Vec2, size: f32, alpha: f32 },
    /// Filled dot
    Dot {
        center: Vec2,
        radius: f32,
        color: &'static str,
        alpha: f32,
    },
    /// Translucent black over everything drawn so far
    Dim { alpha: f32 },
    Text {
        pos: Vec2,
        text: String,
        px: f32,
        color: &'static str,
        align: TextAlign,
    },
}

impl Shape {
    fn text(pos: Vec2, text: impl Into<String>, px: f32, color: &'static str, align: TextAlign) -> Self {
        Shape::Text {
            pos,
            text: text.into(),
            px,
            color,
            align,
        }
    }
}

fn ghost_shape(ghost: &Ghost) -> Option<Shape> {
    if ghost.captured {
        return None;
    }
    Some(Shape::Ghost {
        pos: ghost.pos,
        size: ghost.size,
        alpha: ghost.opacity.clamp(0.0, 1.0),
    })
}

fn particle_shape(particle: &Particle) -> Shape {
    Shape::Dot {
        center: particle.pos,
        radius: PARTICLE_RADIUS,
        color: particle.color.hex(),
        alpha: particle.life.clamp(0.0, 1.0),
    }
}

/// One-line HUD: score, whole seconds left, level
pub fn hud_line(state: &GameState) -> String {
    format!(
        "Score: {}  Time: {}s  Level: {}",
        state.score,
        state.seconds_left_display(),
        state.level
    )
}

fn leaderboard_rows(leaderboard: &HighScores, top: f32, center_x: f32, out: &mut Vec<Shape>) {
    if leaderboard.is_empty() {
        out.push(Shape::text(
            Vec2::new(center_x, top),
            "No high scores yet",
            18.0,
            TEXT_COLOR,
            TextAlign::Center,
        ));
        return;
    }

    for (i, entry) in leaderboard.entries().iter().take(OVERLAY_ROWS).enumerate() {
        out.push(Shape::text(
            Vec2::new(center_x, top + i as f32 * 26.0),
            format!("{}. {}  (level {})  {}", i + 1, entry.score, entry.level, entry.day()),
            18.0,
            TEXT_COLOR,
            TextAlign::Center,
        ));
    }
}

/// Build the draw list for the current frame
pub fn scene(state: &GameState, leaderboard: &HighScores, last_run: Option<&RunSummary>) -> Vec<Shape> {
    let vp = state.viewport;
    let center_x = vp.width / 2.0;
    let mut shapes = Vec::with_capacity(state.ghosts.len() + state.particles.len() + 16);

    shapes.push(Shape::Clear { color: BACKGROUND });
    shapes.extend(state.ghosts.iter().filter_map(ghost_shape));
    shapes.extend(state.particles.iter().map(particle_shape));

    match state.phase {
        GamePhase::Running => {
            shapes.push(Shape::text(
                Vec2::new(16.0, 32.0),
                format!("Score: {}", state.score),
                22.0,
                TEXT_COLOR,
                TextAlign::Left,
            ));
            shapes.push(Shape::text(
                Vec2::new(center_x, 32.0),
                format!("Time: {}s", state.seconds_left_display()),
                22.0,
                TEXT_COLOR,
                TextAlign::Center,
            ));
            shapes.push(Shape::text(
                Vec2::new(vp.width - 16.0, 32.0),
                format!("Level: {}", state.level),
                22.0,
                TEXT_COLOR,
                TextAlign::Right,
            ));
        }
        GamePhase::Idle => {
            let mid = vp.height / 2.0;
            shapes.push(Shape::Dim { alpha: 0.6 });
            shapes.push(Shape::text(
                Vec2::new(center_x, mid - 120.0),
                "Ghost Hunt",
                48.0,
                ACCENT_COLOR,
                TextAlign::Center,
            ));
            shapes.push(Shape::text(
                Vec2::new(center_x, mid - 70.0),
                "Click or press Space to start",
                20.0,
                TEXT_COLOR,
                TextAlign::Center,
            ));
            leaderboard_rows(leaderboard, mid - 10.0, center_x, &mut shapes);
        }
        GamePhase::Over => {
            let mid = vp.height / 2.0;
            shapes.push(Shape::Dim { alpha: 0.6 });
            shapes.push(Shape::text(
                Vec2::new(center_x, mid - 150.0),
                "Time's up!",
                48.0,
                ACCENT_COLOR,
                TextAlign::Center,
            ));
            shapes.push(Shape::text(
                Vec2::new(center_x, mid - 100.0),
                format!("Score: {}  Level: {}", state.score, state.level),
                24.0,
                TEXT_COLOR,
                TextAlign::Center,
            ));
            if let Some(rank) = last_run.and_then(|run| run.rank) {
                shapes.push(Shape::text(
                    Vec2::new(center_x, mid - 70.0),
                    format!("New high score! Rank #{}", rank),
                    20.0,
                    ACCENT_COLOR,
                    TextAlign::Center,
                ));
            }
            leaderboard_rows(leaderboard, mid - 30.0, center_x, &mut shapes);
            shapes.push(Shape::text(
                Vec2::new(center_x, vp.height - 40.0),
                "Click or press Space to play again",
                20.0,
                TEXT_COLOR,
                TextAlign::Center,
            ));
        }
    }

    shapes
}
