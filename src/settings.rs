//! Wheel settings and preferences
//!
//! Persisted in LocalStorage on the web. Every field has a default so partial
//! JSON is accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, WheelError};

/// Spin feel: free-spin speed, ease-out shape and landing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    /// Free-spin velocity (radians per tick)
    pub spin_velocity: f64,
    /// Full turns added before landing
    pub extra_rotations: u32,
    /// Share of the remaining distance covered each tick
    pub decay_factor: f64,
    /// Slowest the wheel may crawl while decelerating (radians per tick)
    pub min_velocity: f64,
    /// Snap onto the target once this close (radians)
    pub landing_epsilon: f64,
    /// Delay between landing and announcement (seconds)
    pub announce_delay_secs: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            spin_velocity: SPIN_VELOCITY,
            extra_rotations: EXTRA_ROTATIONS,
            decay_factor: DECAY_FACTOR,
            min_velocity: MIN_VELOCITY,
            landing_epsilon: LANDING_EPSILON,
            announce_delay_secs: ANNOUNCE_DELAY_SECS,
        }
    }
}

impl SpinTuning {
    /// Reject tunings that would stall, reverse or never land
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(WheelError::InvalidTuning(format!("{name} must be > 0, got {v}")))
            }
        };
        positive("spin_velocity", self.spin_velocity)?;
        positive("min_velocity", self.min_velocity)?;
        positive("landing_epsilon", self.landing_epsilon)?;
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(WheelError::InvalidTuning(format!(
                "decay_factor must be in (0, 1), got {}",
                self.decay_factor
            )));
        }
        if !(self.announce_delay_secs.is_finite() && self.announce_delay_secs >= 0.0) {
            return Err(WheelError::InvalidTuning(format!(
                "announce_delay_secs must be >= 0, got {}",
                self.announce_delay_secs
            )));
        }
        Ok(())
    }
}

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: SpinTuning,

    // === Editor ===
    /// Most rows the editor accepts
    pub max_segments: usize,
    /// Share pinned to the jackpot when rebalancing
    pub jackpot_probability: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: SpinTuning::default(),
            max_segments: MAX_SEGMENTS,
            jackpot_probability: JACKPOT_PROBABILITY,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()?;
        if self.max_segments == 0 {
            return Err(WheelError::InvalidTuning("max_segments must be > 0".into()));
        }
        if !(self.jackpot_probability > 0.0 && self.jackpot_probability < 1.0) {
            return Err(WheelError::InvalidTuning(format!(
                "jackpot_probability must be in (0, 1), got {}",
                self.jackpot_probability
            )));
        }
        Ok(())
    }

    /// Effective cue volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Flip mute; returns the volume cues should now play at
    pub fn toggle_mute(&mut self) -> f32 {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.effective_volume()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "prize_wheel_settings";

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
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            return;
        };
        match self.to_json() {
            Ok(json) => {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
