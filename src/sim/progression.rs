//! Score, perfect streak and speed ramp

use serde::{Deserialize, Serialize};

use super::drop::DropOutcome;
use crate::tuning::Tuning;

/// What a drop changed beyond the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropReport {
    /// Note to play for a perfect drop (streak - 1)
    pub note: Option<usize>,
    /// Growth bonus earned by this drop
    pub growth: bool,
    /// The drop missed; the run is over
    pub game_over: bool,
}

/// Per-run progression counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u32,
    pub perfect_streak: u32,
    /// Slide speed (phase units per second)
    pub speed: f32,
    /// Blocks placed this run
    pub block_count: u32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            perfect_streak: 0,
            speed: tuning.start_speed,
            block_count: 0,
        }
    }

    /// Fold a drop outcome into the counters
    pub fn on_drop(&mut self, outcome: &DropOutcome, tuning: &Tuning) -> DropReport {
        let mut report = DropReport::default();

        match outcome {
            DropOutcome::Miss { .. } => {
                report.game_over = true;
                return report;
            }
            DropOutcome::Perfect { .. } => {
                self.perfect_streak += 1;
                report.note = Some(self.perfect_streak as usize - 1);
                if self.perfect_streak >= tuning.perfect_bonus {
                    report.growth = true;
                    self.perfect_streak = 0;
                }
            }
            DropOutcome::Partial { .. } => {
                self.perfect_streak = 0;
            }
        }

        self.score += 1;
        self.block_count += 1;
        self.speed += tuning.speed_increase;
        report
    }
}
