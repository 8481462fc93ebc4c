//! Game configuration and player preferences
//!
//! `GameConfig` tunes the simulation for a session; `Preferences` are persisted
//! separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::GAME_DURATION_SECS;
use crate::error::StorageError;
use crate::platform::storage::Storage;

/// How the random heading change chance relates to frame rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RedirectMode {
    /// Fixed chance per frame; more redirections on faster displays
    PerFrame,
    /// Chance scaled by the frame's duration (matches `PerFrame` at 60 Hz)
    #[default]
    TimeScaled,
    /// Never redirect (straight lines between bounces)
    Disabled,
}

/// Simulation tuning for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Session length (seconds)
    pub duration_secs: f32,
    pub redirect: RedirectMode,
    /// Let the level-derived lifespan drive the fade timeline instead of the
    /// fixed 2 second one
    pub level_scaled_lifespan: bool,
    /// RNG seed; `None` seeds from the clock at start
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: GAME_DURATION_SECS,
            redirect: RedirectMode::default(),
            level_scaled_lifespan: false,
            seed: None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Preferences {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "ghost-hunt-preferences";

    /// Load preferences, falling back to defaults on missing or unreadable data
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Preferences>(&json) {
                Ok(prefs) => {
                    log::info!("Loaded preferences");
                    return prefs.sanitized();
                }
                Err(e) => log::warn!("Ignoring corrupt preferences: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Preferences unavailable: {}", e),
        }

        log::info!("Using default preferences");
        Self::default()
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Preferences saved");
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
