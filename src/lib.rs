//! Prize Wheel - a weighted spinning prize wheel for the browser
//!
//! Core modules:
//! - `wheel`: Deterministic spin state machine, prize registry, probability model
//! - `settings`: Data-driven spin tuning and preferences
//! - `error`: Configuration errors
//! - `audio`: Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod settings;
pub mod wheel;

pub use error::{Result, WheelError};
pub use settings::{Settings, SpinTuning};

use glam::DVec2;

/// Wheel configuration constants
pub mod consts {
    /// Free-spin angular velocity (radians per tick)
    pub const SPIN_VELOCITY: f64 = 0.3;
    /// Full turns added before landing
    pub const EXTRA_ROTATIONS: u32 = 4;
    /// Deceleration: velocity = remaining * DECAY_FACTOR
    pub const DECAY_FACTOR: f64 = 0.06;
    /// Deceleration floor so the wheel never stalls
    pub const MIN_VELOCITY: f64 = 0.002;
    /// Remaining distance at which the wheel snaps onto its target
    pub const LANDING_EPSILON: f64 = 0.01;
    /// Delay between arrival and result announcement (seconds)
    pub const ANNOUNCE_DELAY_SECS: f64 = 0.2;

    /// Pointer sits at 12 o'clock in canvas coordinates
    pub const POINTER_ANGLE: f64 = -std::f64::consts::FRAC_PI_2;

    /// Most rows the editor will hold
    pub const MAX_SEGMENTS: usize = 9;
    /// Allowed drift of a probability sum away from 1.0
    pub const PROBABILITY_TOLERANCE: f64 = 1e-6;
    /// Jackpot share pinned by auto-balance
    pub const JACKPOT_PROBABILITY: f64 = 0.001;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if a >= std::f64::consts::TAU { 0.0 } else { a }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
