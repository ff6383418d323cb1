//! Sound cues using the Web Audio API
//!
//! Every cue is synthesized from oscillators at play time, so there are no
//! files to fetch and a cue always starts from the beginning.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{SoundCue, SoundSink};
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
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

    /// Jump - quick upward chirp
    fn play_jump(ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = Self::create_osc(ctx, 300.0, OscillatorType::Square)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok()?;
        osc.frequency().set_value_at_time(300.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.12)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(t + 0.2).ok()
    }

    /// Crash - low thud with a falling buzz on top
    fn play_crash(ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();

        let (thud, thud_gain) = Self::create_osc(ctx, 120.0, OscillatorType::Sine)?;
        thud_gain.gain().set_value_at_time(vol * 0.7, t).ok()?;
        thud_gain
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok()?;
        thud.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.3)
            .ok()?;
        thud.start().ok()?;
        thud.stop_with_when(t + 0.4).ok()?;

        let (buzz, buzz_gain) = Self::create_osc(ctx, 220.0, OscillatorType::Sawtooth)?;
        buzz_gain.gain().set_value_at_time(vol * 0.25, t).ok()?;
        buzz_gain
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok()?;
        buzz.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.3)
            .ok()?;
        buzz.start().ok()?;
        buzz.stop_with_when(t + 0.35).ok()
    }

    /// Round over - bright "bravo" arpeggio
    fn play_round_over(ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + i as f64 * 0.1;
            gain.gain().set_value_at_time(vol * 0.3, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok()?;
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.4).ok()?;
        }
        Some(())
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let played = match cue {
            SoundCue::Jump => Self::play_jump(ctx, self.volume),
            SoundCue::Crash => Self::play_crash(ctx, self.volume),
            SoundCue::RoundOver => Self::play_round_over(ctx, self.volume),
        };
        if played.is_none() {
            log::warn!("Failed to play {cue:?}");
        }
    }
}
