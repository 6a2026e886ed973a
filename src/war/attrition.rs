//! Attrition and war exhaustion model
//!
//! Pure functions. Exhaustion and attrition only ever grow while a war is
//! being fought; there is no cool-down, wars end instead.

use serde::{Deserialize, Serialize};

use crate::core::config::ExhaustionConfig;
use crate::core::types::PoliticalImpact;

/// Exhaustion after fighting `duration_days` more days from `prior`.
///
/// `1 - (1 - prior) * exp(-rate * multiplier * days)`. Splitting a span into
/// pieces gives the same result as computing it in one go.
pub fn compute_exhaustion(
    duration_days: u32,
    exhaustion_multiplier: f64,
    prior: f64,
    daily_rate: f64,
) -> f64 {
    let prior = prior.clamp(0.0, 1.0);
    let k = (daily_rate * exhaustion_multiplier).max(0.0);
    let remaining = (1.0 - prior) * (-k * duration_days as f64).exp();
    (1.0 - remaining).clamp(prior, 1.0)
}

/// Attrition from the fraction of starting strength lost
pub fn compute_attrition(casualties_fraction: f64, attrition_multiplier: f64) -> f64 {
    if !casualties_fraction.is_finite() {
        return 1.0;
    }
    (casualties_fraction.max(0.0) * attrition_multiplier.max(0.0)).clamp(0.0, 1.0)
}

/// Casualties a side suffers in one day.
///
/// Losses scale with own strength, the strategy's attrition multiplier and
/// the square root of the enemy/own strength ratio (clamped to 0.25..4).
pub fn daily_casualties(
    own_strength: f64,
    enemy_strength: f64,
    attrition_multiplier: f64,
    daily_rate: f64,
) -> f64 {
    if own_strength <= 0.0 {
        return 0.0;
    }
    let ratio = (enemy_strength.max(0.0) / own_strength).clamp(0.25, 4.0);
    own_strength * daily_rate * attrition_multiplier * ratio.sqrt()
}

/// Upkeep cost of a side for one day
pub fn daily_cost(strength: f64, attrition_multiplier: f64, cost_per_soldier_day: f64) -> f64 {
    strength.max(0.0) * cost_per_soldier_day * attrition_multiplier
}

/// Fraction of the enemy's territory occupied in one day
pub fn conquest_rate(
    own_strength: f64,
    enemy_strength: f64,
    speed_multiplier: f64,
    base_rate: f64,
) -> f64 {
    if own_strength <= 0.0 {
        return 0.0;
    }
    if enemy_strength <= 0.0 {
        return base_rate * speed_multiplier * 2.0;
    }
    let ratio = own_strength / enemy_strength;
    // Below parity the front does not advance
    let advantage = (ratio - 1.0).clamp(0.0, 1.0);
    base_rate * speed_multiplier * advantage
}

/// Bucketed war exhaustion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExhaustionTier {
    Minimal,
    Moderate,
    High,
    Critical,
}

impl ExhaustionTier {
    pub fn from_exhaustion(exhaustion: f64, config: &ExhaustionConfig) -> Self {
        if exhaustion >= config.critical_threshold {
            ExhaustionTier::Critical
        } else if exhaustion >= config.high_threshold {
            ExhaustionTier::High
        } else if exhaustion >= config.moderate_threshold {
            ExhaustionTier::Moderate
        } else {
            ExhaustionTier::Minimal
        }
    }

    /// Approval change applied once per war week
    pub fn weekly_approval_penalty(&self) -> f64 {
        match self {
            ExhaustionTier::Minimal => 0.0,
            ExhaustionTier::Moderate => -0.5,
            ExhaustionTier::High => -1.5,
            ExhaustionTier::Critical => -3.0,
        }
    }

    /// Stress added once per war week
    pub fn weekly_stress_increase(&self) -> f64 {
        match self {
            ExhaustionTier::Minimal => 0.0,
            ExhaustionTier::Moderate => 1.0,
            ExhaustionTier::High => 3.0,
            ExhaustionTier::Critical => 6.0,
        }
    }

    pub fn weekly_impact(&self) -> PoliticalImpact {
        PoliticalImpact::new(self.weekly_approval_penalty(), 0.0, self.weekly_stress_increase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExhaustionTier::Minimal => "Minimal",
            ExhaustionTier::Moderate => "Moderate",
            ExhaustionTier::High => "High",
            ExhaustionTier::Critical => "Critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 0.004;

    #[test]
    fn test_exhaustion_grows_with_duration() {
        let short = compute_exhaustion(30, 1.0, 0.0, RATE);
        let long = compute_exhaustion(120, 1.0, 0.0, RATE);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(long < 1.0);
    }

    #[test]
    fn test_exhaustion_composes_over_split_spans() {
        let whole = compute_exhaustion(100, 1.0, 0.1, RATE);
        let split = compute_exhaustion(60, 1.0, compute_exhaustion(40, 1.0, 0.1, RATE), RATE);
        assert!((whole - split).abs() < 1e-12);
    }

    #[test]
    fn test_exhaustion_scaled_by_strategy() {
        let aggressive = compute_exhaustion(60, 1.4, 0.0, RATE);
        let defensive = compute_exhaustion(60, 0.7, 0.0, RATE);
        assert!(aggressive > defensive);
    }

    #[test]
    fn test_zero_days_keeps_prior() {
        assert_eq!(compute_exhaustion(0, 1.0, 0.42, RATE), 0.42);
    }

    #[test]
    fn test_attrition_clamped() {
        assert_eq!(compute_attrition(0.5, 1.5), 0.75);
        assert_eq!(compute_attrition(0.9, 1.5), 1.0);
        assert_eq!(compute_attrition(-0.2, 1.0), 0.0);
        assert_eq!(compute_attrition(f64::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_outnumbered_side_loses_more() {
        let weak = daily_casualties(100_000.0, 400_000.0, 1.0, 0.001);
        let strong = daily_casualties(400_000.0, 100_000.0, 1.0, 0.001);
        assert!(weak / 100_000.0 > strong / 400_000.0);
    }

    #[test]
    fn test_conquest_requires_superiority() {
        assert_eq!(conquest_rate(100.0, 200.0, 1.0, 0.002), 0.0);
        assert!(conquest_rate(300.0, 200.0, 1.5, 0.002) > conquest_rate(300.0, 200.0, 1.0, 0.002));
    }

    #[test]
    fn test_tiers() {
        let config = ExhaustionConfig::default();
        assert_eq!(ExhaustionTier::from_exhaustion(0.1, &config), ExhaustionTier::Minimal);
        assert_eq!(ExhaustionTier::from_exhaustion(0.25, &config), ExhaustionTier::Moderate);
        assert_eq!(ExhaustionTier::from_exhaustion(0.6, &config), ExhaustionTier::High);
        assert_eq!(ExhaustionTier::from_exhaustion(0.9, &config), ExhaustionTier::Critical);
        assert!(
            ExhaustionTier::Critical.weekly_approval_penalty()
                < ExhaustionTier::High.weekly_approval_penalty()
        );
    }
}
