//! Conflict configuration with documented constants
//!
//! All magic numbers for the war, exhaustion and territory layers are
//! collected here. The defaults reproduce the behavior the war screens were
//! designed around; a TOML file can override any subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConflictError, Result};

/// Top-level configuration injected into every manager
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictConfig {
    pub war: WarConfig,
    pub exhaustion: ExhaustionConfig,
    pub territory: TerritoryConfig,
}

/// War declaration and per-day combat constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarConfig {
    /// Maximum simultaneous active wars a country may be involved in
    ///
    /// A declaration that would make the attacker's count exceed this is
    /// rejected.
    pub max_active_wars: usize,

    /// Minimum attacker strength required to declare war
    pub min_declaration_strength: u64,

    /// Days a strategy change takes to fully phase in
    pub transition_duration_days: u32,

    /// Fraction of a side's strength lost per day at multiplier 1.0
    ///
    /// At 0.0004, a balanced side facing an equal enemy loses about 4.7%
    /// of its strength over 120 days.
    pub daily_casualty_rate: f64,

    /// Upkeep cost per soldier per day at multiplier 1.0
    pub cost_per_soldier_day: f64,

    /// Daily fraction of enemy territory occupied at equal strength and
    /// speed 1.0
    pub base_conquest_rate: f64,

    /// Attrition at which a side collapses and the war ends in decisive
    /// victory for the other side
    pub decisive_attrition: f64,
}

impl Default for WarConfig {
    fn default() -> Self {
        Self {
            max_active_wars: 3,
            min_declaration_strength: 100_000,
            transition_duration_days: 7,
            daily_casualty_rate: 0.0004,
            cost_per_soldier_day: 25.0,
            base_conquest_rate: 0.002,
            decisive_attrition: 0.8,
        }
    }
}

/// War exhaustion growth and tier boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustionConfig {
    /// Exponential growth rate per day at multiplier 1.0
    ///
    /// Exhaustion approaches 1.0 as `1 - exp(-rate * days)`. At 0.004 a
    /// balanced war sits at ~0.38 after 120 days and ~0.77 after a year.
    pub daily_rate: f64,

    /// Exhaustion at which the "moderate" tier begins
    pub moderate_threshold: f64,

    /// Exhaustion at which the "high" tier begins
    pub high_threshold: f64,

    /// Exhaustion at which the "critical" tier begins
    pub critical_threshold: f64,
}

impl Default for ExhaustionConfig {
    fn default() -> Self {
        Self {
            daily_rate: 0.004,
            moderate_threshold: 0.25,
            high_threshold: 0.50,
            critical_threshold: 0.75,
        }
    }
}

/// Conquered territory, rebellion and investment constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    /// Morale of a freshly annexed territory
    pub initial_morale: f64,

    /// Daily morale change of a conquered territory (negative = resentment)
    pub conquered_morale_drift: f64,

    /// Daily morale change of an autonomous territory
    pub autonomous_morale_drift: f64,

    /// Rebellion risk at or above which a rebellion breaks out
    pub rebellion_risk_threshold: f64,

    /// Share of the population that takes up arms when a rebellion starts,
    /// scaled by popular support
    pub rebel_mobilization: f64,

    /// Success probability per unit of strength ratio
    pub suppression_base_chance: f64,

    /// Upper bound on suppression success probability
    pub suppression_max_chance: f64,

    /// Treasury cost per rebel fighter when suppressing
    pub suppression_cost_per_rebel: f64,

    /// Player casualties as a fraction of rebel strength
    pub suppression_casualty_rate: f64,

    /// Rebel strength growth after a failed suppression
    pub failed_suppression_growth: f64,

    /// Morale gained when a rebellion is crushed
    pub suppression_morale_gain: f64,

    /// GDP multiplier factor applied by an autonomy grant
    pub autonomy_gdp_factor: f64,

    /// Morale gained from an autonomy grant
    pub autonomy_morale_gain: f64,

    /// Treasury balance required before investing in a territory
    pub min_investment_treasury: f64,

    /// Morale gained per investment
    pub investment_morale_gain: f64,

    /// Years over which reparations are paid
    pub reparation_years: u32,
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        Self {
            initial_morale: 0.4,
            conquered_morale_drift: -0.001,
            autonomous_morale_drift: 0.001,
            rebellion_risk_threshold: 0.7,
            rebel_mobilization: 0.02,
            suppression_base_chance: 0.70,
            suppression_max_chance: 0.95,
            suppression_cost_per_rebel: 500.0,
            suppression_casualty_rate: 0.10,
            failed_suppression_growth: 0.10,
            suppression_morale_gain: 0.15,
            autonomy_gdp_factor: 0.75,
            autonomy_morale_gain: 0.2,
            min_investment_treasury: 1_000_000.0,
            investment_morale_gain: 0.1,
            reparation_years: 10,
        }
    }
}

impl ConflictConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; keys that are absent keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConflictConfig = toml::from_str(content)
            .map_err(|e| ConflictError::Config(format!("Invalid TOML: {}", e)))?;
        config.validate().map_err(ConflictError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.war.max_active_wars == 0 {
            return Err("max_active_wars must be at least 1".into());
        }

        if self.war.transition_duration_days == 0 {
            return Err("transition_duration_days must be at least 1".into());
        }

        if self.war.daily_casualty_rate <= 0.0 || self.exhaustion.daily_rate <= 0.0 {
            return Err("Daily rates must be positive".into());
        }

        if !(0.0..=1.0).contains(&self.war.decisive_attrition) {
            return Err(format!(
                "decisive_attrition ({}) must be within [0, 1]",
                self.war.decisive_attrition
            ));
        }

        let e = &self.exhaustion;
        if !(0.0 < e.moderate_threshold
            && e.moderate_threshold < e.high_threshold
            && e.high_threshold < e.critical_threshold
            && e.critical_threshold <= 1.0)
        {
            return Err(format!(
                "Exhaustion thresholds must be ordered within (0, 1]: {} < {} < {}",
                e.moderate_threshold, e.high_threshold, e.critical_threshold
            ));
        }

        let t = &self.territory;
        for (name, value) in [
            ("initial_morale", t.initial_morale),
            ("rebellion_risk_threshold", t.rebellion_risk_threshold),
            ("suppression_max_chance", t.suppression_max_chance),
            ("autonomy_gdp_factor", t.autonomy_gdp_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must be within [0, 1]", name, value));
            }
        }

        if t.reparation_years == 0 {
            return Err("reparation_years must be at least 1".into());
        }

        Ok(())
    }
}
