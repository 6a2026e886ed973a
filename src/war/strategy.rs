//! War strategy and timed strategy transitions
//!
//! A war is fought under one strategy at a time. Selecting a new one does
//! not take effect immediately: its multipliers phase in linearly over the
//! configured transition duration, after which it becomes current.

use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::error::{ConflictError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarStrategy {
    /// Fast advance, heavy losses on both sides
    Aggressive,
    #[default]
    Balanced,
    /// Hold ground, minimal losses, little progress
    Defensive,
    /// Grind the enemy down slowly
    Attrition,
}

/// Multipliers a strategy applies to the daily war model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyMultipliers {
    pub attrition: f64,
    pub speed: f64,
    pub exhaustion: f64,
}

impl StrategyMultipliers {
    /// Linear blend from `self` (t = 0) to `other` (t = 1)
    pub fn lerp(&self, other: &StrategyMultipliers, t: f64) -> StrategyMultipliers {
        let t = t.clamp(0.0, 1.0);
        StrategyMultipliers {
            attrition: self.attrition + (other.attrition - self.attrition) * t,
            speed: self.speed + (other.speed - self.speed) * t,
            exhaustion: self.exhaustion + (other.exhaustion - self.exhaustion) * t,
        }
    }
}

impl WarStrategy {
    pub fn all() -> &'static [WarStrategy] {
        &[
            WarStrategy::Aggressive,
            WarStrategy::Balanced,
            WarStrategy::Defensive,
            WarStrategy::Attrition,
        ]
    }

    pub fn attrition_multiplier(&self) -> f64 {
        match self {
            WarStrategy::Aggressive => 1.5,
            WarStrategy::Balanced => 1.0,
            WarStrategy::Defensive => 0.6,
            WarStrategy::Attrition => 0.8,
        }
    }

    /// Territory conquest rate multiplier
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            WarStrategy::Aggressive => 1.5,
            WarStrategy::Balanced => 1.0,
            WarStrategy::Defensive => 0.5,
            WarStrategy::Attrition => 0.7,
        }
    }

    /// Aggressive > Balanced > Attrition > Defensive
    pub fn exhaustion_multiplier(&self) -> f64 {
        match self {
            WarStrategy::Aggressive => 1.4,
            WarStrategy::Balanced => 1.0,
            WarStrategy::Defensive => 0.7,
            WarStrategy::Attrition => 0.85,
        }
    }

    pub fn multipliers(&self) -> StrategyMultipliers {
        StrategyMultipliers {
            attrition: self.attrition_multiplier(),
            speed: self.speed_multiplier(),
            exhaustion: self.exhaustion_multiplier(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WarStrategy::Aggressive => "Aggressive",
            WarStrategy::Balanced => "Balanced",
            WarStrategy::Defensive => "Defensive",
            WarStrategy::Attrition => "Attrition",
        }
    }
}

/// Current strategy plus an optional in-flight transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    pub current: WarStrategy,
    pub target: Option<WarStrategy>,
    pub transition_start: Option<GameDate>,
    pub transition_duration_days: u32,
}

impl StrategyState {
    pub fn new(current: WarStrategy, transition_duration_days: u32) -> Self {
        Self {
            current,
            target: None,
            transition_start: None,
            transition_duration_days: transition_duration_days.max(1),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Begin phasing in `new`. Picking the current or pending strategy is
    /// rejected and leaves the state untouched.
    pub fn select(&mut self, new: WarStrategy, date: GameDate) -> Result<()> {
        if self.current == new || self.target == Some(new) {
            return Err(ConflictError::StrategyUnchanged(new));
        }
        self.target = Some(new);
        self.transition_start = Some(date);
        Ok(())
    }

    /// Fraction of the transition completed at `date`, in [0, 1].
    /// An idle state reports 1.0.
    pub fn transition_progress(&self, date: GameDate) -> f64 {
        match (self.target, self.transition_start) {
            (Some(_), Some(start)) => {
                let elapsed = date.days_since(start) as f64;
                (elapsed / self.transition_duration_days as f64).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Multipliers in force at `date`, blending toward the target
    pub fn effective_multipliers(&self, date: GameDate) -> StrategyMultipliers {
        let current = self.current.multipliers();
        match self.target {
            Some(target) => current.lerp(&target.multipliers(), self.transition_progress(date)),
            None => current,
        }
    }

    /// Complete the transition if it has fully phased in.
    /// Returns the strategy that became current.
    pub fn advance(&mut self, date: GameDate) -> Option<WarStrategy> {
        let target = self.target?;
        if self.transition_progress(date) < 1.0 {
            return None;
        }
        self.current = target;
        self.target = None;
        self.transition_start = None;
        Some(target)
    }
}
