//! Simulation settings and preferences
//!
//! Read from LocalStorage on the web build. Only tuning lives here;
//! the qyuts themselves are never stored.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::sim::SimParams;

/// Settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size, speed, rotation and removal threshold
    pub params: SimParams,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u32,
    /// Fixed spawn seed (None = seeded from the clock at startup)
    pub seed: Option<u64>,

    // === Presentation ===
    /// Draw the "click to start" figure while nothing is alive
    pub show_idle_prompt: bool,
    /// Reduced motion (idle figure stops spinning)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            params: SimParams::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
            show_idle_prompt: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Replace unusable values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = SimParams::default();
        let params = &mut self.params;

        if !(params.size.is_finite() && params.size > 0.0) {
            log::warn!("Invalid qyut size {}, using {}", params.size, defaults.size);
            params.size = defaults.size;
        }
        if !(params.speed.is_finite() && params.speed > 0.0) {
            log::warn!("Invalid speed {}, using {}", params.speed, defaults.speed);
            params.speed = defaults.speed;
        }
        if !(params.rotation_step.is_finite() && params.rotation_step > 0.0) {
            log::warn!(
                "Rotation step must be positive, got {}, using {}",
                params.rotation_step,
                defaults.rotation_step
            );
            params.rotation_step = defaults.rotation_step;
        }
        if params.removal_threshold == 0 {
            log::warn!("Removal threshold must be at least 1, using {}", defaults.removal_threshold);
            params.removal_threshold = defaults.removal_threshold;
        }
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = TICK_INTERVAL_MS;
        }
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bouncing_qyuts_settings";

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

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
