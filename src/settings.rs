//! Game settings and preferences
//!
//! Loaded from an optional JSON file. Missing fields fall back to defaults,
//! and command line flags override whatever the file says.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Wall-clock budget of one tick in milliseconds
    pub tick_millis: u64,
    /// Ghost RNG seed; random when absent
    pub seed: Option<u64>,
    /// Let the agent wander on its own
    pub demo: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_millis: crate::consts::TICK_BUDGET.as_millis() as u64,
            seed: None,
            demo: false,

            // HUD
            show_fps: false,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Read settings from `path`, or use the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write settings back out as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Wall-clock budget of one tick (never zero)
    pub fn tick_budget(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    /// Volume actually applied to cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}
