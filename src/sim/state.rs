//! Game state and core simulation types
//!
//! One `GameState` per session; ghosts and particles are plain values owned by it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::{GameSettings, level_for_score, settings_for_level};
use crate::consts::*;

/// Per-session entity identifier
pub type EntityId = u32;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started
    Idle,
    /// Clock running, ghosts spawning
    Running,
    /// Time ran out (terminal until restart)
    Over,
}

/// Where a ghost is in its fade timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadePhase {
    FadingIn,
    Visible,
    FadingOut,
}

/// Play area in screen-space units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left coordinate a square of `size` can have and stay inside
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }
}

/// A clickable ghost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ghost {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length of the ghost's square
    pub size: f32,
    pub speed: f32,
    /// 0-1
    pub opacity: f32,
    pub captured: bool,
    pub fade: FadePhase,
    /// Unit-length heading
    pub direction: Vec2,
    /// Session clock timestamp (ms) at spawn
    pub created_at: f64,
    /// Total time on screen (ms) including both fades
    pub lifespan_ms: f64,
}

impl Ghost {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Point-in-square hit test
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.pos + Vec2::splat(self.size);
        point.x >= self.pos.x && point.x <= max.x && point.y >= self.pos.y && point.y <= max.y
    }

    /// Captured, or fully faded out
    pub fn is_expired(&self) -> bool {
        self.captured || (self.fade == FadePhase::FadingOut && self.opacity <= 0.0)
    }
}

/// Capture burst colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Coral,
    Turquoise,
    Sky,
    Amber,
    Crimson,
    Amethyst,
    Jade,
}

impl ParticleColor {
    pub const ALL: [ParticleColor; 7] = [
        ParticleColor::Coral,
        ParticleColor::Turquoise,
        ParticleColor::Sky,
        ParticleColor::Amber,
        ParticleColor::Crimson,
        ParticleColor::Amethyst,
        ParticleColor::Jade,
    ];

    /// CSS colour string
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Coral => "#ff6b6b",
            ParticleColor::Turquoise => "#4ecdc4",
            ParticleColor::Sky => "#45b7d1",
            ParticleColor::Amber => "#f39c12",
            ParticleColor::Crimson => "#e74c3c",
            ParticleColor::Amethyst => "#9b59b6",
            ParticleColor::Jade => "#1abc9c",
        }
    }
}

/// A particle from a capture burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, counts down to 0
    pub life: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Complete state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Seconds left, never negative
    pub time_left: f32,
    pub phase: GamePhase,
    /// Difficulty tier derived from score
    pub level: u32,
    pub viewport: Viewport,
    /// Live ghosts in spawn order
    pub ghosts: Vec<Ghost>,
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Fresh idle session
    pub fn new(viewport: Viewport, duration_secs: f32) -> Self {
        Self {
            score: 0,
            time_left: duration_secs.max(0.0),
            phase: GamePhase::Idle,
            level: level_for_score(0),
            viewport,
            ghosts: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Idle -> Running. Returns false if the session was already started.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Running;
        true
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Difficulty parameters for the current level
    pub fn settings(&self) -> GameSettings {
        settings_for_level(self.level)
    }

    /// Uncaptured ghosts still on screen
    pub fn live_ghost_count(&self) -> usize {
        self.ghosts.iter().filter(|g| !g.captured).count()
    }

    pub fn ghost(&self, id: EntityId) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.id == id)
    }

    /// Topmost (most recently spawned) uncaptured ghost under `point`
    pub fn ghost_at(&self, point: Vec2) -> Option<EntityId> {
        self.ghosts
            .iter()
            .rev()
            .find(|g| !g.captured && g.contains(point))
            .map(|g| g.id)
    }

    /// Whole seconds remaining, rounded up for the HUD
    pub fn seconds_left_display(&self) -> u32 {
        self.time_left.max(0.0).ceil() as u32
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Viewport::new(800.0, 600.0), GAME_DURATION_SECS)
    }
}
