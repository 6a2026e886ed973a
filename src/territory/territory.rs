//! Conquered and autonomous territories

use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::types::{CountryCode, TerritoryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerritoryKind {
    Conquered,
    Autonomous,
    Core,
}

impl TerritoryKind {
    /// How strongly low morale turns into rebellion risk
    pub fn risk_factor(&self) -> f64 {
        match self {
            TerritoryKind::Conquered => 1.0,
            TerritoryKind::Autonomous => 0.5,
            TerritoryKind::Core => 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub former_owner: CountryCode,
    pub owner: CountryCode,
    /// Fraction of the former owner's base territory
    pub size: f64,
    /// Area in the former owner's territory units
    pub area: f64,
    pub population: u64,
    pub conquered_on: GameDate,
    pub morale: f64,
    pub rebellion_risk: f64,
    pub kind: TerritoryKind,
    pub gdp_multiplier: f64,
}

impl Territory {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TerritoryId,
        name: String,
        former_owner: CountryCode,
        owner: CountryCode,
        size: f64,
        area: f64,
        population: u64,
        conquered_on: GameDate,
        morale: f64,
    ) -> Self {
        let mut territory = Self {
            id,
            name,
            former_owner,
            owner,
            size: size.clamp(0.0, 1.0),
            area: area.max(0.0),
            population,
            conquered_on,
            morale: morale.clamp(0.0, 1.0),
            rebellion_risk: 0.0,
            kind: TerritoryKind::Conquered,
            gdp_multiplier: 0.6,
        };
        territory.refresh_risk();
        territory
    }

    /// Recompute rebellion risk from morale; they always move oppositely
    pub fn refresh_risk(&mut self) {
        self.rebellion_risk = ((1.0 - self.morale) * self.kind.risk_factor()).clamp(0.0, 1.0);
    }

    pub fn adjust_morale(&mut self, delta: f64) {
        self.morale = (self.morale + delta).clamp(0.0, 1.0);
        self.refresh_risk();
    }

    /// Share of the former owner's GDP this territory yields its owner.
    /// Nothing flows while the territory is in revolt.
    pub fn gdp_contribution(&self, former_owner_gdp: f64, in_revolt: bool) -> f64 {
        if in_revolt {
            return 0.0;
        }
        former_owner_gdp.max(0.0) * self.size * self.gdp_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_territory(morale: f64) -> Territory {
        Territory::new(
            TerritoryId(1),
            "Northern Provinces".to_string(),
            "CHN".into(),
            "USA".into(),
            0.25,
            2_400.0,
            1_000_000,
            GameDate(0),
            morale,
        )
    }

    #[test]
    fn test_risk_inverse_to_morale() {
        let mut t = test_territory(0.4);
        assert!((t.rebellion_risk - 0.6).abs() < 1e-12);
        t.adjust_morale(0.3);
        assert!((t.rebellion_risk - 0.3).abs() < 1e-12);
        t.adjust_morale(5.0);
        assert_eq!(t.morale, 1.0);
        assert_eq!(t.rebellion_risk, 0.0);
    }

    #[test]
    fn test_autonomy_halves_risk() {
        let mut t = test_territory(0.2);
        t.kind = TerritoryKind::Autonomous;
        t.refresh_risk();
        assert!((t.rebellion_risk - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_no_gdp_during_revolt() {
        let t = test_territory(0.5);
        assert_eq!(t.gdp_contribution(1_000.0, true), 0.0);
        assert!((t.gdp_contribution(1_000.0, false) - 150.0).abs() < 1e-9);
    }
}
