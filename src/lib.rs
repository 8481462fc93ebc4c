//! Ghost Hunt - A timed ghost-catching arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (ghost lifecycle, difficulty curve, capture)
//! - `game`: Session driver (frame loop, spawn timer, game-over side effects)
//! - `highscores`: Persisted top-10 leaderboard
//! - `platform`: Browser/native platform abstraction
//! - `audio`: Sound cues (Web Audio on wasm32)
//! - `renderer`: Presentation collaborators

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StorageError;
pub use game::{FrameReport, Game, RunSummary};
pub use highscores::{HighScores, LeaderboardEntry};
pub use settings::{GameConfig, Preferences, RedirectMode};

/// Game configuration constants
pub mod consts {
    /// Length of one session in seconds
    pub const GAME_DURATION_SECS: f32 = 30.0;

    /// Points awarded per captured ghost (level-independent)
    pub const POINTS_PER_CAPTURE: u32 = 10;
    /// Score needed to advance one level
    pub const POINTS_PER_LEVEL: u32 = 30;

    /// Spawn area inset from the viewport edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Smallest spawn range used when the viewport is too small
    pub const MIN_SPAWN_RANGE: f32 = 100.0;
    /// Spawn speed is the nominal speed times a factor in this range
    pub const SPAWN_SPEED_FACTOR_MIN: f32 = 1.2;
    pub const SPAWN_SPEED_FACTOR_MAX: f32 = 2.0;

    /// Fade timeline (milliseconds)
    pub const FADE_IN_MS: f64 = 150.0;
    pub const GHOST_LIFESPAN_MS: f64 = 2000.0;
    pub const FADE_OUT_MS: f64 = 400.0;

    /// Max random nudge applied to the other direction component on a bounce
    pub const BOUNCE_JITTER: f32 = 0.3;
    /// Chance of a random heading change per 60 Hz frame
    pub const REDIRECT_CHANCE: f64 = 0.008;
    /// Max heading change (radians) for a random redirection
    pub const REDIRECT_MAX_ANGLE: f32 = 0.6;
    /// Frame rate the redirect chance was tuned at
    pub const REFERENCE_FPS: f64 = 60.0;

    /// Capture burst
    pub const PARTICLE_BURST_COUNT: usize = 15;
    pub const PARTICLE_MAX_SPEED: f32 = 150.0;
    /// Particle life lost per second
    pub const PARTICLE_DECAY_RATE: f32 = 2.0;

    /// Ghosts queued at session start (capped by max ghosts)
    pub const INITIAL_SPAWN_COUNT: usize = 3;
    pub const INITIAL_SPAWN_STAGGER_MS: f64 = 200.0;

    /// Results screen stays up at least this long before a click restarts
    pub const RESTART_GRACE_MS: f64 = 1000.0;
}
