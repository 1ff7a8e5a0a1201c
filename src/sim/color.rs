//! Block colour cycling
//!
//! Each spawn darkens the current colour one step per lit channel; once a
//! channel dips under the threshold the cycler jumps to the next palette hue
//! at full brightness. The last palette slot (white) is never cycled into.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Number of palette entries
pub const TOTAL_COLOURS: usize = 7;

/// Block palette (RGB in [0, 1])
pub const PALETTE: [Vec3; TOTAL_COLOURS] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Fade-then-jump colour sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCycler {
    pub current: Vec3,
    pub index: usize,
    fade_step: f32,
    fade_threshold: f32,
}

impl ColorCycler {
    /// Start at palette entry 0, full brightness
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            current: PALETTE[0],
            index: 0,
            fade_step: tuning.fade_step,
            fade_threshold: tuning.fade_threshold,
        }
    }

    /// Back to palette entry 0, full brightness
    pub fn reset(&mut self) {
        self.index = 0;
        self.current = PALETTE[0];
    }

    /// Jump to the next hue, wrapping before the reserved white slot
    pub fn advance(&mut self) {
        self.index += 1;
        if self.index >= TOTAL_COLOURS - 1 {
            self.index = 0;
        }
        self.current = PALETTE[self.index];
    }

    /// Colour for a freshly spawned block
    ///
    /// Channels are visited R, G, B. The first channel to fall below the
    /// threshold advances the palette and ends the call, so the fresh hue is
    /// returned untouched.
    pub fn on_new_block_spawn(&mut self) -> Vec3 {
        for channel in 0..3 {
            if self.current[channel] > 0.0 {
                self.current[channel] -= self.fade_step;
                if self.current[channel] < self.fade_threshold {
                    self.advance();
                    break;
                }
            }
        }
        self.current
    }
}
