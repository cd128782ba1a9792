//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build. Nothing about a run is saved,
//! only these preferences.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::Color;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug ===
    /// Outline the player's collision box every frame
    pub show_colliders: bool,
    /// Collider outline color (yellow when unset)
    pub collider_color: Option<Color>,
    /// Allow the score-tap ghost mode cheat
    pub allow_ghost_mode: bool,

    // === Visual Effects ===
    /// Fading and glow particles
    pub ambient_particles: bool,
    /// Drifting clouds in the upper half of the field
    pub backdrops: bool,

    /// Fixed RNG seed for every run (time-based when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_colliders: false,
            collider_color: None,
            allow_ghost_mode: true,

            ambient_particles: true,
            backdrops: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from their stored JSON form
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidSettings(e.to_string()))
    }

    /// Seed for a run started at `now_ms`
    pub fn run_seed(&self, now_ms: u64) -> u64 {
        self.seed
            .unwrap_or_else(|| now_ms ^ 0x9E37_79B9_7F4A_7C15)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bobs_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
