//! Audio cues using Web Audio API
//!
//! Procedurally generated - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::wheel::AudioSink;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Segment passes the pointer
    Tick,
    /// Trigger button pressed
    Click,
    /// Wheel stopped on an ordinary prize
    Landed,
    /// Wheel stopped on the first prize
    Jackpot,
}

/// Audio manager for the wheel
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Tick => self.play_tick(ctx, vol),
            SoundEffect::Click => self.play_click(ctx, vol),
            SoundEffect::Landed => self.play_landed(ctx, vol),
            SoundEffect::Jackpot => self.play_jackpot(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Tick - short peg clack
    fn play_tick(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.03)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.04).ok();
    }

    /// Click - soft button thump
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Landed - two-note chime
    fn play_landed(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.25_f32, 659.25].into_iter().enumerate() {
            let start = t + i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.35, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(start + 0.35).ok();
            }
        }
    }

    /// Jackpot - rising fanfare arpeggio
    fn play_jackpot(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let notes = [523.25_f32, 659.25, 783.99, 1046.5];
        for (i, freq) in notes.into_iter().enumerate() {
            let start = t + i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.25, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(start + 0.45).ok();
            }
        }

        // Shimmer on top
        if let Some((osc, gain)) = self.create_osc(ctx, 2093.0, OscillatorType::Sine) {
            let start = t + 0.4;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.15, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.6)
                .ok();
            osc.start().ok();
            osc.stop_with_when(start + 0.65).ok();
        }
    }
}

impl AudioSink for AudioManager {
    fn on_tick_boundary(&mut self, _index: usize) {
        self.play(SoundEffect::Tick);
    }

    fn on_click_trigger(&mut self) {
        self.play(SoundEffect::Click);
    }

    fn on_landed(&mut self, is_first_prize: bool) {
        self.play(if is_first_prize {
            SoundEffect::Jackpot
        } else {
            SoundEffect::Landed
        });
    }
}
