//! Audio system
//!
//! Procedurally generated tones through the Web Audio API in the browser;
//! natively the cues are only logged. Perfect drops climb an eight-note
//! scale, one step per consecutive perfect.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// C major scale starting at C5 (Hz)
pub const NOTE_FREQUENCIES: [f32; 8] = [
    523.25, 587.33, 659.25, 698.46, 783.99, 880.00, 987.77, 1046.50,
];

/// Frequency for a perfect-streak note; indices past the top repeat it
pub fn note_frequency(index: usize) -> f32 {
    NOTE_FREQUENCIES[index.min(NOTE_FREQUENCIES.len() - 1)]
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Perfect drop, index into the note scale
    PerfectNote(usize),
    /// Block sliced on a partial drop
    Slice,
    /// Missed block falls off
    Topple,
    /// New high score
    HighScore,
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with volumes taken from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Volume sounds actually play at
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        match effect {
            SoundEffect::PerfectNote(index) => {
                log::debug!("Note {index} ({:.1} Hz) at volume {vol:.2}", note_frequency(index));
            }
            other => log::debug!("Sound {other:?} at volume {vol:.2}"),
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PerfectNote(index) => self.play_note(ctx, note_frequency(index), vol),
            SoundEffect::Slice => self.play_slice(ctx, vol),
            SoundEffect::Topple => self.play_topple(ctx, vol),
            SoundEffect::HighScore => self.play_high_score(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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

    /// Perfect drop - clean bell-ish tone
    #[cfg(target_arch = "wasm32")]
    fn play_note(&self, ctx: &AudioContext, freq: f32, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.65).ok();
        }

        // Octave shimmer
        if let Some((osc, gain)) = self.create_osc(ctx, freq * 2.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    /// Slice - short dull tap
    #[cfg(target_arch = "wasm32")]
    fn play_slice(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Topple - long falling sweep
    #[cfg(target_arch = "wasm32")]
    fn play_topple(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.9)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.9)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 1.0).ok();
    }

    /// High score - rising arpeggio over the top of the note scale
    #[cfg(target_arch = "wasm32")]
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, &freq) in NOTE_FREQUENCIES.iter().rev().take(4).rev().enumerate() {
            let start = t + i as f64 * 0.09;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.15, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.3).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_scale_rises() {
        for pair in NOTE_FREQUENCIES.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(note_frequency(0), 523.25);
        assert_eq!(note_frequency(7), 1046.50);
        assert_eq!(note_frequency(40), 1046.50);
    }

    #[test]
    fn test_volume_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        assert!((audio.effective_volume() - 0.25).abs() < 1e-6);

        audio.apply_settings(&Settings {
            muted: true,
            ..Default::default()
        });
        assert_eq!(audio.effective_volume(), 0.0);

        // Out-of-range volumes are clamped
        audio.apply_settings(&Settings {
            master_volume: 7.0,
            sfx_volume: 0.5,
            ..Default::default()
        });
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);
    }
}
