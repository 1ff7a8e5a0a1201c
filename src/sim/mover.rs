//! Moving block controller
//!
//! The block slides along one axis as `sin(phase) * bounds`, measured from
//! the world origin. The other axis stays aligned with the block below.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::footprint::{Axis, Footprint};

/// Position along the active axis for an oscillation phase
#[inline]
pub fn slide_offset(phase: f32, bounds: f32) -> f32 {
    phase.sin() * bounds
}

/// The block currently sliding above the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBlock {
    pub footprint: Footprint,
    pub axis: Axis,
    /// Oscillation accumulator
    pub phase: f32,
    pub color: Vec3,
}

impl MovingBlock {
    /// Spawn one level above `top`, same size, centred over it
    pub fn spawn(top: &Footprint, axis: Axis, color: Vec3) -> Self {
        Self {
            footprint: top.stacked(),
            axis,
            phase: 0.0,
            color,
        }
    }

    /// Accumulate `dt * speed` into the phase and move the block
    ///
    /// Returns the new centre.
    pub fn advance(&mut self, dt: f32, speed: f32, bounds: f32) -> Vec2 {
        self.phase += dt * speed;
        *self.axis.of_mut(&mut self.footprint.center) = slide_offset(self.phase, bounds);
        self.footprint.center
    }

    /// Start a fresh oscillation (after a drop)
    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }
}
