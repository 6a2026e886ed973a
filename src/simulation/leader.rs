//! The player character's political standing

use serde::{Deserialize, Serialize};

use crate::core::types::{CountryCode, MilitaryStatus, PoliticalImpact};

pub const APPROVAL_RANGE: (f64, f64) = (0.0, 100.0);
pub const REPUTATION_RANGE: (f64, f64) = (-100.0, 100.0);
pub const STRESS_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub country: CountryCode,
    pub military: MilitaryStatus,
    pub approval: f64,
    pub reputation: f64,
    pub stress: f64,
}

impl Leader {
    pub fn new(name: &str, country: impl Into<CountryCode>, military: MilitaryStatus) -> Self {
        Self {
            name: name.to_string(),
            country: country.into(),
            military,
            approval: 50.0,
            reputation: 0.0,
            stress: 20.0,
        }
    }

    /// Apply a political impact, clamping each stat to its range
    pub fn apply(&mut self, impact: PoliticalImpact) {
        let (lo, hi) = APPROVAL_RANGE;
        self.approval = (self.approval + impact.approval).clamp(lo, hi);
        let (lo, hi) = REPUTATION_RANGE;
        self.reputation = (self.reputation + impact.reputation).clamp(lo, hi);
        let (lo, hi) = STRESS_RANGE;
        self.stress = (self.stress + impact.stress).clamp(lo, hi);
    }

    /// Remove fallen soldiers from the leader's forces
    pub fn take_losses(&mut self, casualties: u64) {
        if let MilitaryStatus::Strength(strength) = &mut self.military {
            *strength = strength.saturating_sub(casualties);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps() {
        let mut leader = Leader::new("President", "USA", MilitaryStatus::Strength(1_400_000));
        leader.apply(PoliticalImpact::new(80.0, -150.0, -40.0));
        assert_eq!(leader.approval, 100.0);
        assert_eq!(leader.reputation, -100.0);
        assert_eq!(leader.stress, 0.0);

        leader.apply(PoliticalImpact::new(-5.0, 10.0, 3.0));
        assert_eq!(leader.approval, 95.0);
        assert_eq!(leader.reputation, -90.0);
        assert_eq!(leader.stress, 3.0);
    }

    #[test]
    fn test_losses_never_go_negative() {
        let mut leader = Leader::new("President", "USA", MilitaryStatus::Strength(10_000));
        leader.take_losses(2_500);
        assert_eq!(leader.military, MilitaryStatus::Strength(7_500));
        leader.take_losses(50_000);
        assert_eq!(leader.military, MilitaryStatus::Strength(0));

        let mut civilian = Leader::new("Premier", "MEX", MilitaryStatus::Unavailable);
        civilian.take_losses(1_000);
        assert_eq!(civilian.military, MilitaryStatus::Unavailable);
    }
}
