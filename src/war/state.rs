//! War record and its classification enums

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::config::ExhaustionConfig;
use crate::core::types::{CountryCode, PoliticalImpact, WarId};
use crate::war::attrition::ExhaustionTier;
use crate::war::peace::PeaceTerm;
use crate::war::strategy::{StrategyState, WarStrategy};

/// Which side the strategy-controlling country is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarType {
    /// The controlling country is the attacker
    Offensive,
    /// The controlling country is the defender
    Defensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarJustification {
    TerritorialDispute,
    SelfDefense,
    RegimeChange,
    HumanitarianIntervention,
    ResourceAccess,
    PreemptiveStrike,
}

impl WarJustification {
    /// Reputation change for the attacker at declaration
    pub fn reputation_impact(&self) -> f64 {
        match self {
            WarJustification::SelfDefense => 0.0,
            WarJustification::HumanitarianIntervention => -2.0,
            WarJustification::TerritorialDispute => -5.0,
            WarJustification::PreemptiveStrike => -8.0,
            WarJustification::RegimeChange => -10.0,
            WarJustification::ResourceAccess => -12.0,
        }
    }

    /// Rally-round-the-flag approval change for the attacker at declaration
    pub fn approval_impact(&self) -> f64 {
        match self {
            WarJustification::SelfDefense => 5.0,
            WarJustification::HumanitarianIntervention => 2.0,
            WarJustification::TerritorialDispute => 0.0,
            WarJustification::PreemptiveStrike => -2.0,
            WarJustification::RegimeChange => -3.0,
            WarJustification::ResourceAccess => -5.0,
        }
    }

    pub fn declaration_impact(&self) -> PoliticalImpact {
        PoliticalImpact::new(self.approval_impact(), self.reputation_impact(), 0.0)
    }
}

/// How a war ended. Set exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarOutcome {
    /// Negotiated settlement; the victor dictated the terms
    PeaceTreaty { victor: CountryCode },
    /// Unconditional capitulation by `loser`
    Surrender { loser: CountryCode },
    /// One side's army collapsed or its territory was overrun
    DecisiveVictory { victor: CountryCode },
}

impl WarOutcome {
    pub fn victor<'a>(&'a self, war: &'a War) -> &'a CountryCode {
        match self {
            WarOutcome::PeaceTreaty { victor } | WarOutcome::DecisiveVictory { victor } => victor,
            WarOutcome::Surrender { loser } => war.opponent_of(loser).unwrap_or(loser),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub attacker: CountryCode,
    pub defender: CountryCode,
    pub war_type: WarType,
    pub justification: WarJustification,

    // Strength snapshots at declaration
    pub attacker_strength: u64,
    pub defender_strength: u64,

    // Running totals keyed by country
    pub casualties: AHashMap<CountryCode, f64>,
    pub costs: AHashMap<CountryCode, f64>,

    pub start_date: GameDate,
    pub end_date: Option<GameDate>,
    /// Last date the daily model has been run up to
    pub last_updated: GameDate,

    pub strategy: StrategyState,

    pub exhaustion: f64,
    pub attacker_attrition: f64,
    pub defender_attrition: f64,
    /// Fraction of the opposing side's territory held by the controlling side
    pub occupied_fraction: f64,

    pub outcome: Option<WarOutcome>,
    pub peace_term: Option<PeaceTerm>,
    /// Set once the controlling side occupies land; fixed at conclusion
    pub territory_conquered: Option<f64>,
}

impl War {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: WarId,
        attacker: CountryCode,
        defender: CountryCode,
        war_type: WarType,
        justification: WarJustification,
        attacker_strength: u64,
        defender_strength: u64,
        date: GameDate,
        transition_duration_days: u32,
    ) -> Self {
        let mut casualties = AHashMap::new();
        casualties.insert(attacker.clone(), 0.0);
        casualties.insert(defender.clone(), 0.0);
        let costs = casualties.clone();

        Self {
            id,
            attacker,
            defender,
            war_type,
            justification,
            attacker_strength,
            defender_strength,
            casualties,
            costs,
            start_date: date,
            end_date: None,
            last_updated: date,
            strategy: StrategyState::new(WarStrategy::Balanced, transition_duration_days),
            exhaustion: 0.0,
            attacker_attrition: 0.0,
            defender_attrition: 0.0,
            occupied_fraction: 0.0,
            outcome: None,
            peace_term: None,
            territory_conquered: None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn involves(&self, country: &CountryCode) -> bool {
        &self.attacker == country || &self.defender == country
    }

    pub fn opponent_of(&self, country: &CountryCode) -> Option<&CountryCode> {
        if country == &self.attacker {
            Some(&self.defender)
        } else if country == &self.defender {
            Some(&self.attacker)
        } else {
            None
        }
    }

    /// Country whose strategy this war tracks
    pub fn controlling_side(&self) -> &CountryCode {
        match self.war_type {
            WarType::Offensive => &self.attacker,
            WarType::Defensive => &self.defender,
        }
    }

    pub fn duration_days(&self, date: GameDate) -> u32 {
        date.days_since(self.start_date)
    }

    pub fn attrition_of(&self, country: &CountryCode) -> Option<f64> {
        if country == &self.attacker {
            Some(self.attacker_attrition)
        } else if country == &self.defender {
            Some(self.defender_attrition)
        } else {
            None
        }
    }

    pub fn initial_strength_of(&self, country: &CountryCode) -> Option<u64> {
        if country == &self.attacker {
            Some(self.attacker_strength)
        } else if country == &self.defender {
            Some(self.defender_strength)
        } else {
            None
        }
    }

    pub fn casualties_of(&self, country: &CountryCode) -> f64 {
        self.casualties.get(country).copied().unwrap_or(0.0)
    }

    pub fn cost_of(&self, country: &CountryCode) -> f64 {
        self.costs.get(country).copied().unwrap_or(0.0)
    }

    /// Strength remaining after casualties
    pub fn current_strength_of(&self, country: &CountryCode) -> f64 {
        let initial = self.initial_strength_of(country).unwrap_or(0) as f64;
        (initial - self.casualties_of(country)).max(0.0)
    }

    pub fn exhaustion_tier(&self, config: &ExhaustionConfig) -> ExhaustionTier {
        ExhaustionTier::from_exhaustion(self.exhaustion, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_war(war_type: WarType) -> War {
        War::new(
            WarId(1),
            "USA".into(),
            "CHN".into(),
            war_type,
            WarJustification::TerritorialDispute,
            1_400_000,
            2_035_000,
            GameDate(0),
            7,
        )
    }

    #[test]
    fn test_new_war_starts_clean() {
        let war = test_war(WarType::Offensive);
        assert_eq!(war.exhaustion, 0.0);
        assert_eq!(war.casualties_of(&"USA".into()), 0.0);
        assert_eq!(war.cost_of(&"CHN".into()), 0.0);
        assert!(!war.is_concluded());
        assert_eq!(war.strategy.current, WarStrategy::Balanced);
    }

    #[test]
    fn test_controlling_side_follows_war_type() {
        assert_eq!(test_war(WarType::Offensive).controlling_side(), &CountryCode::from("USA"));
        assert_eq!(test_war(WarType::Defensive).controlling_side(), &CountryCode::from("CHN"));
    }

    #[test]
    fn test_opponent_lookup() {
        let war = test_war(WarType::Offensive);
        assert_eq!(war.opponent_of(&"USA".into()), Some(&CountryCode::from("CHN")));
        assert_eq!(war.opponent_of(&"FRA".into()), None);
        assert!(war.involves(&"CHN".into()));
    }

    #[test]
    fn test_surrender_victor_is_opponent() {
        let war = test_war(WarType::Offensive);
        let outcome = WarOutcome::Surrender { loser: "CHN".into() };
        assert_eq!(outcome.victor(&war), &CountryCode::from("USA"));
    }
}
