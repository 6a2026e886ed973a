//! Rebellions in conquered territory

use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::types::{RebellionId, TerritoryId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rebellion {
    pub id: RebellionId,
    pub territory: TerritoryId,
    /// Armed rebels
    pub strength: u32,
    /// Popular support, always `1 - territory morale`
    pub support: f64,
    pub started_on: GameDate,
}

/// Result of a suppression attempt. A failed roll is still `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuppressionOutcome {
    pub success: bool,
    pub probability: f64,
    pub cost: f64,
    /// Losses suffered by the suppressing force
    pub casualties: u32,
}

/// Chance of crushing a rebellion: `min(max_chance, base * ratio)`
pub fn suppression_probability(
    military_strength: u64,
    rebel_strength: u32,
    base_chance: f64,
    max_chance: f64,
) -> f64 {
    if rebel_strength == 0 {
        return max_chance;
    }
    let ratio = military_strength as f64 / rebel_strength as f64;
    (base_chance * ratio).min(max_chance).max(0.0)
}

/// Rebels raised when a territory rises up
pub fn initial_rebel_strength(population: u64, support: f64, mobilization: f64) -> u32 {
    let raised = (population as f64 * support.clamp(0.0, 1.0) * mobilization).round();
    raised.clamp(1.0, u32::MAX as f64) as u32
}
