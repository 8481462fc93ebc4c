//! Session driver
//!
//! Owns the authoritative `GameState` for one session and everything that
//! feeds it: the seeded RNG, the frame clock, the spawn timer, and the audio
//! and storage collaborators. The host calls `frame` once per rendered frame
//! and forwards clicks to `click`/`capture`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioEvent, AudioSink};
use crate::consts::RESTART_GRACE_MS;
use crate::highscores::{self, HighScores};
use crate::platform::storage::Storage;
use crate::platform::time::FrameClock;
use crate::settings::{GameConfig, Preferences};
use crate::sim::{
    Capture, EntityId, GamePhase, GameState, SpawnTimer, TickOutcome, Viewport, capture, tick,
    try_spawn_ghost,
};

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub level: u32,
    /// Leaderboard rank achieved (1-indexed)
    pub rank: Option<usize>,
    /// Whether the leaderboard write went through
    pub saved: bool,
}

/// What happened during one `frame` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Seconds simulated
    pub dt: f32,
    pub tick: TickOutcome,
    /// Ghosts added by the spawn timer
    pub spawned: usize,
    /// Set on the frame the session ended
    pub finished: Option<RunSummary>,
}

/// A game session host
pub struct Game<S: Storage, A: AudioSink> {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    spawn_timer: SpawnTimer,
    clock: FrameClock,
    storage: S,
    audio: A,
    preferences: Preferences,
    leaderboard: HighScores,
    last_run: Option<RunSummary>,
    /// Frame timestamp of the last game over
    ended_at_ms: Option<f64>,
}

impl<S: Storage, A: AudioSink> Game<S, A> {
    /// Create an idle game; loads preferences and the leaderboard
    pub fn new(config: GameConfig, viewport: Viewport, storage: S, mut audio: A) -> Self {
        let preferences = Preferences::load(&storage);
        let leaderboard = HighScores::load(&storage);
        if preferences.muted {
            audio.notify(AudioEvent::MuteToggled { muted: true });
        }

        let seed = config.seed.unwrap_or_else(clock_seed);
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state: GameState::new(viewport, config.duration_secs),
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer: SpawnTimer::new(),
            clock: FrameClock::new(),
            config,
            storage,
            audio,
            preferences,
            leaderboard,
            last_run: None,
            ended_at_ms: None,
        }
    }

    /// Start a fresh session, discarding any previous one
    pub fn start(&mut self, now_ms: f64) {
        // Tear down the old schedule before the new state goes in
        self.stop();

        let viewport = self.state.viewport;
        self.state = GameState::new(viewport, self.config.duration_secs);
        self.state.start();
        self.last_run = None;
        self.ended_at_ms = None;

        self.clock.delta_secs(now_ms);
        let settings = self.state.settings();
        self.spawn_timer.schedule_opening(&settings, now_ms);
        self.spawn_timer.arm(self.state.level, &settings, now_ms);

        self.audio.notify(AudioEvent::SessionStart);
        log::info!("Session started ({}s)", self.config.duration_secs);
    }

    /// Same as `start`; kept for the restart button
    pub fn restart(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Cancel the spawn schedule and forget the frame timestamp
    fn stop(&mut self) {
        self.spawn_timer.cancel();
        self.clock.reset();
    }

    /// Run one frame: tick the simulation, then service the spawn timer
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.state.is_running() {
            return report;
        }

        report.dt = self.clock.delta_secs(now_ms);
        report.tick = tick(&mut self.state, report.dt, now_ms, &self.config, &mut self.rng);

        if report.tick.ended {
            report.finished = Some(self.finish(now_ms));
            return report;
        }

        if report.tick.level_changed {
            let settings = self.state.settings();
            self.spawn_timer.arm(self.state.level, &settings, now_ms);
            log::info!(
                "Level {} (spawn every {}ms, up to {} ghosts)",
                self.state.level,
                settings.spawn_interval_ms,
                settings.max_ghosts
            );
        }

        report.spawned = self.pump_spawns(now_ms);
        report
    }

    /// Fire any due spawn timer events; returns ghosts actually added
    pub fn pump_spawns(&mut self, now_ms: f64) -> usize {
        if !self.state.is_running() {
            return 0;
        }

        let due = self.spawn_timer.poll(now_ms);
        let mut spawned = 0;
        for _ in 0..due {
            if let Some(id) = try_spawn_ghost(&mut self.state, now_ms, &self.config, &mut self.rng)
            {
                log::debug!("Spawned ghost {}", id);
                spawned += 1;
            }
        }
        spawned
    }

    /// Game-over side effects: stop scheduling, record the run, play the cue
    fn finish(&mut self, now_ms: f64) -> RunSummary {
        self.stop();
        self.ended_at_ms = Some(now_ms);

        let score = self.state.score;
        let level = self.state.level;
        let mut summary = RunSummary {
            score,
            level,
            rank: None,
            saved: false,
        };

        if score > 0 {
            match highscores::record_run(&mut self.storage, score, level) {
                Ok(run) => {
                    self.leaderboard = run.leaderboard;
                    summary.rank = run.rank;
                    summary.saved = true;
                }
                Err(e) => log::warn!("Could not save score: {}", e),
            }
        }

        self.audio.notify(AudioEvent::SessionEnd);
        log::info!("Session over: score {}, level {}", score, level);
        self.last_run = Some(summary.clone());
        summary
    }

    /// Try to catch a ghost by id. Stale ids are ignored.
    pub fn capture(&mut self, ghost_id: EntityId) -> Option<Capture> {
        let caught = capture(&mut self.state, ghost_id, &mut self.rng)?;
        self.audio.notify(AudioEvent::Capture);
        log::debug!("Caught ghost {} (+{})", caught.ghost_id, caught.points);
        Some(caught)
    }

    /// Catch the topmost ghost under a screen point
    pub fn click(&mut self, x: f32, y: f32) -> Option<Capture> {
        let id = self.state.ghost_at(Vec2::new(x, y))?;
        self.capture(id)
    }

    /// Pointer press: captures while running, starts from the title screen,
    /// and restarts from the results screen once it has been shown for
    /// `RESTART_GRACE_MS`. Clicks still landing as time runs out are ignored.
    pub fn press(&mut self, x: f32, y: f32, now_ms: f64) -> Option<Capture> {
        match self.state.phase {
            GamePhase::Running => self.click(x, y),
            GamePhase::Idle => {
                self.start(now_ms);
                None
            }
            GamePhase::Over => {
                let shown_ms = self.ended_at_ms.map_or(f64::INFINITY, |t| now_ms - t);
                if shown_ms >= RESTART_GRACE_MS {
                    self.restart(now_ms);
                }
                None
            }
        }
    }

    /// Flip mute, persist it, and tell the audio sink. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.preferences.muted = !self.preferences.muted;
        let muted = self.preferences.muted;
        if let Err(e) = self.preferences.save(&mut self.storage) {
            log::warn!("Could not save preferences: {}", e);
        }
        self.audio.notify(AudioEvent::MuteToggled { muted });
        muted
    }

    /// Track a resized play area; bounce and spawn bounds follow immediately
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Summary of the most recent finished session
    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Seed from wall-clock time when none is configured
fn clock_seed() -> u64 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() as u64
}
