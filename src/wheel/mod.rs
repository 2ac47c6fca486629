//! Deterministic wheel core
//!
//! All spin and selection logic lives here. This module must stay pure:
//! - One update per tick, driven by the caller
//! - Injected randomness only
//! - No rendering or platform dependencies

pub mod editor;
pub mod geometry;
pub mod prizes;
pub mod probability;
pub mod sinks;
pub mod state;
pub mod tick;

pub use editor::PrizeEditor;
pub use geometry::{label_anchor, pointed_index, pointer_tip, segment_angle, target_angle};
pub use prizes::{PrizeEntry, PrizeRegistry, PrizeSource, default_prizes};
pub use probability::{
    RandomSource, ReplayRandom, SeededRandom, auto_balance_weights, cumulative_table,
    select_index,
};
pub use sinks::{AudioSink, RenderSink, Silent, present};
pub use state::{LandedPrize, SpinPhase, SpinState, WheelEvent};
pub use tick::{SpinController, decelerate_velocity, ticks_to_land};
