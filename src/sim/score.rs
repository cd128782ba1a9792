//! Score clock and difficulty escalation

use crate::consts::{ESCALATION_EVERY, ESCALATION_STEP};

/// Tracks which score milestone last raised the speed multiplier, so each
/// multiple of [`ESCALATION_EVERY`] escalates exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreClock {
    last_escalation: u64,
}

impl ScoreClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// One score interval elapsed: add a point and escalate if a milestone was reached.
    /// Returns the new multiplier when it changed.
    pub fn tick(&mut self, score: &mut u64, speed_multiplier: &mut f32) -> Option<f32> {
        *score += 1;
        self.escalate(*score, speed_multiplier)
    }

    /// Raise `speed_multiplier` by one step if `score` is a positive multiple
    /// of the escalation period that has not escalated yet
    pub fn escalate(&mut self, score: u64, speed_multiplier: &mut f32) -> Option<f32> {
        if score == 0 || !score.is_multiple_of(ESCALATION_EVERY) || score == self.last_escalation {
            return None;
        }
        self.last_escalation = score;
        *speed_multiplier += ESCALATION_STEP;
        Some(*speed_multiplier)
    }
}
