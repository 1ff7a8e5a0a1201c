//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through `Tuning`, so a
//! JSON blob in storage can rebalance the game without a rebuild.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::storage;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Width/depth of the base block, and the cap for growth bonuses
    pub block_width: f32,
    pub block_height: f32,
    /// Peak slide excursion
    pub bounds: f32,
    /// Perfect-drop tolerance (absolute size difference)
    pub tolerance: f32,
    /// Perfect drops per growth bonus
    pub perfect_bonus: u32,
    pub perfect_increase: f32,
    pub start_speed: f32,
    pub speed_increase: f32,
    pub debris_mass: f32,
    pub fade_step: f32,
    pub fade_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            bounds: BLOCK_BOUNDS,
            tolerance: TOLERANCE,
            perfect_bonus: PERFECT_BONUS,
            perfect_increase: PERFECT_INCREASE,
            start_speed: TILE_START_SPEED,
            speed_increase: TILE_SPEED_INCREASE,
            debris_mass: DEBRIS_MASS,
            fade_step: FADE_STEP,
            fade_threshold: FADE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Storage key
    const STORAGE_KEY: &'static str = "stack_tower_tuning";

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("invalid tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.block_width <= 0.0 || self.block_height <= 0.0 {
            bail!(
                "block size must be positive (width {}, height {})",
                self.block_width,
                self.block_height
            );
        }
        if self.bounds <= 0.0 {
            bail!("slide bounds must be positive, got {}", self.bounds);
        }
        if self.tolerance < 0.0 {
            bail!("tolerance cannot be negative, got {}", self.tolerance);
        }
        if self.perfect_bonus == 0 {
            bail!("perfect bonus threshold must be at least 1");
        }
        if self.start_speed <= 0.0 || self.speed_increase < 0.0 {
            bail!(
                "speed must start positive and never decrease (start {}, increase {})",
                self.start_speed,
                self.speed_increase
            );
        }
        if self.fade_step <= 0.0 {
            bail!("fade step must be positive, got {}", self.fade_step);
        }
        Ok(())
    }

    /// Load tuning from storage, falling back to defaults
    pub fn load() -> Self {
        match storage::read(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {e:#}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read tuning: {e:#}");
                Self::default()
            }
        }
    }

    /// World elevation of a block centre at `level`
    #[inline]
    pub fn elevation(&self, level: u32) -> f32 {
        self.block_width + self.block_height / 2.0 + level as f32 * self.block_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.perfect_bonus, 8);
        assert!((t.tolerance - 0.05).abs() < f32::EPSILON);
        assert!((t.elevation(0) - BASE_ELEVATION).abs() < 1e-6);
        assert!((t.elevation(4) - (BASE_ELEVATION + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "tolerance": 0.1, "perfect_bonus": 4 }"#).unwrap();
        assert!((t.tolerance - 0.1).abs() < f32::EPSILON);
        assert_eq!(t.perfect_bonus, 4);
        assert_eq!(t.block_width, BLOCK_WIDTH);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(Tuning::from_json("not json").is_err());
        assert!(Tuning::from_json(r#"{ "block_width": -1.0 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "perfect_bonus": 0 }"#).is_err());
    }
}
