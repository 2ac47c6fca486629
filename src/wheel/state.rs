//! Spin state and events
//!
//! All state the spin controller mutates lives here.

use serde::{Deserialize, Serialize};

/// Current phase of the spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// At rest, waiting for the trigger
    #[default]
    Idle,
    /// Free spin at constant velocity
    Accelerating,
    /// Easing toward the chosen prize
    Decelerating,
}

/// Angle and velocity of the wheel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpinState {
    pub phase: SpinPhase,
    /// Accumulated rotation (radians, never decreases)
    pub current_angle: f64,
    /// Radians per tick
    pub angular_velocity: f64,
    /// Rotation to stop at (set while decelerating)
    pub target_angle: Option<f64>,
    /// Prize the wheel is heading for (set while decelerating)
    pub chosen_index: Option<usize>,
}

impl SpinState {
    /// Back to Idle defaults, keeping the wheel where it stopped
    pub fn reset(&mut self) {
        *self = Self {
            current_angle: self.current_angle,
            ..Self::default()
        };
    }

    pub fn is_spinning(&self) -> bool {
        self.phase != SpinPhase::Idle
    }
}

/// Outcome of a completed spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandedPrize {
    pub index: usize,
    pub label: String,
    /// Index 0 is the jackpot slot
    pub is_first_prize: bool,
}

/// Events emitted by the controller, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// Trigger pressed (whether or not it changed anything)
    Click,
    /// Free spin began
    Started,
    /// Prize chosen, deceleration began
    Stopping { chosen_index: usize, target_angle: f64 },
    /// A different segment moved under the pointer
    TickBoundary { index: usize },
    /// Wheel came to rest on a prize
    Landed(LandedPrize),
    /// Announcement delay elapsed
    Announce(LandedPrize),
}

/// A payload released after a delay
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    remaining_secs: f64,
    payload: T,
}

impl<T> Deferred<T> {
    pub fn new(delay_secs: f64, payload: T) -> Self {
        Self {
            remaining_secs: delay_secs.max(0.0),
            payload,
        }
    }

    /// Advance by `dt`; returns the payload once the delay has elapsed
    pub fn advance(self, dt: f64) -> Result<T, Self> {
        let remaining_secs = self.remaining_secs - dt;
        if remaining_secs <= 0.0 {
            Ok(self.payload)
        } else {
            Err(Self {
                remaining_secs,
                payload: self.payload,
            })
        }
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }
}
