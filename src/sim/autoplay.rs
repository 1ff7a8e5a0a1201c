//! Attract-mode autoplayer
//!
//! Picks a seeded random aim point for every new moving block and taps when
//! the block slides across it. Same seed, same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Seeded bot driving `TickInput`s
#[derive(Debug, Clone)]
pub struct Autoplayer {
    rng: Pcg32,
    /// Largest aim offset from the top block's centre (world units)
    pub skill_radius: f32,
    /// Restart automatically after a game over
    pub auto_restart: bool,
    /// Level of the block currently aimed at, with its aim offset
    target: Option<(u32, f32)>,
    /// Signed distance from the aim point on the previous tick
    last_delta: Option<f32>,
}

/// Serializable autoplayer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub skill_radius: f32,
    pub auto_restart: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            skill_radius: 0.04,
            auto_restart: true,
        }
    }
}

impl Autoplayer {
    pub fn new(config: AutoplayConfig) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            skill_radius: config.skill_radius,
            auto_restart: config.auto_restart,
            target: None,
            last_delta: None,
        }
    }

    /// Input for the next tick
    pub fn decide(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Menu | GamePhase::GameOver => {
                self.target = None;
                self.last_delta = None;
                if self.auto_restart {
                    TickInput::START
                } else {
                    TickInput::default()
                }
            }
            GamePhase::Playing => {
                let (Some(moving), Some(top)) = (state.moving.as_ref(), state.top()) else {
                    return TickInput::default();
                };
                let level = moving.footprint.level;

                let aim = match self.target {
                    Some((l, aim)) if l == level => aim,
                    _ => {
                        let aim = if self.skill_radius > 0.0 {
                            self.rng.random_range(-self.skill_radius..=self.skill_radius)
                        } else {
                            0.0
                        };
                        self.target = Some((level, aim));
                        self.last_delta = None;
                        aim
                    }
                };

                // Spawn position is not on the slide path yet
                if moving.phase <= 0.0 {
                    return TickInput::default();
                }

                let axis = moving.axis;
                let delta = axis.of(moving.footprint.center) - (axis.of(top.footprint.center) + aim);
                let crossed = self
                    .last_delta
                    .is_some_and(|prev| prev.signum() != delta.signum());
                self.last_delta = Some(delta);

                if crossed || delta == 0.0 {
                    TickInput::ACTION
                } else {
                    TickInput::default()
                }
            }
        }
    }
}
