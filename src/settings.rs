//! Game settings and preferences
//!
//! Read from `settings.json` next to the executable's working directory.
//! Missing fields take their defaults; an unreadable file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYER_NAME, SAVE_FILE};
use crate::persistence::{self, PersistError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded in the ranking
    pub player_name: String,
    /// Ranking document location
    pub save_file: PathBuf,
    /// Target frames per second for the frame pacer
    pub framerate: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible obstacle layouts
    pub seed: Option<u64>,
    /// Length of the headless demo run (seconds)
    pub demo_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            save_file: PathBuf::from(SAVE_FILE),
            framerate: 60,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            seed: None,
            demo_seconds: 20,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(PersistError::NotFound(_)) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values a hand-edited file could get wrong
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.framerate = self.framerate.clamp(1, 240);
        if self.player_name.trim().is_empty() {
            self.player_name = DEFAULT_PLAYER_NAME.to_string();
        }
        self
    }

    /// Frame budget for the pacer
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.framerate.max(1) as f64)
    }
}
