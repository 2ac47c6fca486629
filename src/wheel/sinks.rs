//! Render and audio collaborators
//!
//! The controller never calls out; the frame loop drains its events and hands
//! them here once per frame.

use super::prizes::PrizeEntry;
use super::state::WheelEvent;
use super::tick::SpinController;

/// Draws the wheel and shows results
pub trait RenderSink {
    /// Called once per frame with the accumulated rotation
    fn draw(&mut self, angle: f64, prizes: &[PrizeEntry]);

    /// Called once per spin, after the announcement delay
    fn announce(&mut self, index: usize, label: &str);

    /// Trigger label changes (e.g. "Start" / "Stop")
    fn spinning_changed(&mut self, _spinning: bool) {}
}

/// Short cues. Implementations must not block.
pub trait AudioSink {
    fn on_tick_boundary(&mut self, _index: usize) {}
    fn on_click_trigger(&mut self) {}
    fn on_landed(&mut self, _is_first_prize: bool) {}
}

/// Audio sink that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {}

/// Route one frame's events, then draw
pub fn present(
    controller: &mut SpinController,
    render: &mut dyn RenderSink,
    audio: &mut dyn AudioSink,
) {
    for event in controller.drain_events() {
        match event {
            WheelEvent::Click => audio.on_click_trigger(),
            WheelEvent::Started => render.spinning_changed(true),
            WheelEvent::Stopping { .. } => {}
            WheelEvent::TickBoundary { index } => audio.on_tick_boundary(index),
            WheelEvent::Landed(prize) => audio.on_landed(prize.is_first_prize),
            WheelEvent::Announce(prize) => {
                render.announce(prize.index, &prize.label);
                render.spinning_changed(false);
            }
        }
    }
    render.draw(controller.state().current_angle, controller.prizes().entries());
}
