//! Peace terms, acceptance likelihood and surrender
//!
//! Acceptance is the only stochastic decision in the war layer. The roll is
//! drawn from an injected generator so a seeded run replays exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::country::CountryRegistry;
use crate::core::error::{ConflictError, Result};
use crate::core::types::{CountryCode, PoliticalImpact, WarId};
use crate::events::{ConflictEvent, EventLog};
use crate::war::engine::{PeaceSettlement, SettlementKind, WarEngine};

/// Attrition differential above which a surrender is total
pub const FULL_CONQUEST_THRESHOLD: f64 = 0.30;
/// Attrition differential above which a surrender cedes land
pub const PARTIAL_TERRITORY_THRESHOLD: f64 = 0.15;

/// Fixed cost to the side that surrenders
pub const SURRENDER_PENALTY: PoliticalImpact = PoliticalImpact {
    approval: -20.0,
    reputation: -15.0,
    stress: 10.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeaceTerm {
    StatusQuo,
    Reparations,
    PartialTerritory,
    FullConquest,
}

/// Acceptance curve parameters for one term
#[derive(Debug, Clone, Copy, PartialEq)]
struct AcceptanceCurve {
    base: f64,
    sensitivity: f64,
    floor: f64,
    ceiling: f64,
}

impl PeaceTerm {
    pub fn all() -> &'static [PeaceTerm] {
        &[
            PeaceTerm::StatusQuo,
            PeaceTerm::Reparations,
            PeaceTerm::PartialTerritory,
            PeaceTerm::FullConquest,
        ]
    }

    /// Fraction of the loser's base territory transferred to the victor
    pub fn territory_percent(&self) -> f64 {
        match self {
            PeaceTerm::StatusQuo | PeaceTerm::Reparations => 0.0,
            PeaceTerm::PartialTerritory => 0.25,
            PeaceTerm::FullConquest => 1.0,
        }
    }

    /// Approval change for the side imposing the term
    pub fn approval_impact(&self) -> f64 {
        match self {
            PeaceTerm::StatusQuo => 2.0,
            PeaceTerm::Reparations => 5.0,
            PeaceTerm::PartialTerritory => 8.0,
            PeaceTerm::FullConquest => 12.0,
        }
    }

    /// Reputation change for the side imposing the term
    pub fn reputation_impact(&self) -> f64 {
        match self {
            PeaceTerm::StatusQuo => 5.0,
            PeaceTerm::Reparations => 0.0,
            PeaceTerm::PartialTerritory => -5.0,
            PeaceTerm::FullConquest => -15.0,
        }
    }

    pub fn impact(&self) -> PoliticalImpact {
        PoliticalImpact::new(self.approval_impact(), self.reputation_impact(), 0.0)
    }

    /// Total reparations owed by a loser with the given annual GDP
    pub fn reparation_amount(&self, loser_gdp: f64) -> f64 {
        let share = match self {
            PeaceTerm::StatusQuo => 0.0,
            PeaceTerm::Reparations => 0.10,
            PeaceTerm::PartialTerritory => 0.05,
            PeaceTerm::FullConquest => 0.15,
        };
        loser_gdp.max(0.0) * share
    }

    fn curve(&self) -> AcceptanceCurve {
        match self {
            PeaceTerm::StatusQuo => AcceptanceCurve {
                base: 0.70,
                sensitivity: 0.5,
                floor: 0.20,
                ceiling: 0.95,
            },
            PeaceTerm::Reparations => AcceptanceCurve {
                base: 0.50,
                sensitivity: 1.0,
                floor: 0.10,
                ceiling: 0.85,
            },
            PeaceTerm::PartialTerritory => AcceptanceCurve {
                base: 0.30,
                sensitivity: 1.5,
                floor: 0.05,
                ceiling: 0.70,
            },
            PeaceTerm::FullConquest => AcceptanceCurve {
                base: 0.10,
                sensitivity: 2.0,
                floor: 0.02,
                ceiling: 0.50,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PeaceTerm::StatusQuo => "Status Quo",
            PeaceTerm::Reparations => "Reparations",
            PeaceTerm::PartialTerritory => "Partial Territory",
            PeaceTerm::FullConquest => "Full Conquest",
        }
    }
}

/// Chance the enemy accepts `term`.
///
/// Harsher terms start lower and react more strongly to the attrition gap.
/// For any pair of attrition values the result is ordered
/// StatusQuo ≥ Reparations ≥ PartialTerritory ≥ FullConquest.
pub fn likelihood(term: PeaceTerm, player_attrition: f64, enemy_attrition: f64) -> f64 {
    let curve = term.curve();
    let diff = enemy_attrition.clamp(0.0, 1.0) - player_attrition.clamp(0.0, 1.0);
    (curve.base + curve.sensitivity * diff).clamp(curve.floor, curve.ceiling)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeaceResponse {
    Accepted,
    Rejected,
}

/// One uniform draw against `likelihood`
pub fn resolve<R: Rng>(likelihood: f64, rng: &mut R) -> PeaceResponse {
    let roll: f64 = rng.gen();
    if roll < likelihood {
        PeaceResponse::Accepted
    } else {
        PeaceResponse::Rejected
    }
}

/// The harshest term the victor can impose on a surrendering side
pub fn surrender_term(loser_attrition: f64, victor_attrition: f64) -> PeaceTerm {
    let diff = loser_attrition - victor_attrition;
    if diff > FULL_CONQUEST_THRESHOLD {
        PeaceTerm::FullConquest
    } else if diff > PARTIAL_TERRITORY_THRESHOLD {
        PeaceTerm::PartialTerritory
    } else {
        PeaceTerm::Reparations
    }
}

/// Result of a proposal or surrender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationResult {
    pub response: PeaceResponse,
    pub likelihood: f64,
    pub term: PeaceTerm,
    /// Present when the war was settled
    pub settlement: Option<PeaceSettlement>,
    /// Political effect on the country that acted
    pub impact: PoliticalImpact,
}

/// Offer `term` to the enemy of `proposer` in war `war_id`.
///
/// A rejection changes nothing and the war goes on.
#[allow(clippy::too_many_arguments)]
pub fn propose<R: Rng>(
    engine: &mut WarEngine,
    war_id: WarId,
    term: PeaceTerm,
    proposer: &CountryCode,
    countries: &CountryRegistry,
    date: GameDate,
    rng: &mut R,
    log: &mut EventLog,
) -> Result<NegotiationResult> {
    let war = engine.war(war_id).ok_or(ConflictError::WarNotFound(war_id))?;
    if war.is_concluded() {
        return Err(ConflictError::AlreadyConcluded(war_id));
    }
    let enemy = war
        .opponent_of(proposer)
        .cloned()
        .ok_or_else(|| ConflictError::NotBelligerent {
            war: war_id,
            country: proposer.clone(),
        })?;
    if countries.get(&enemy).is_none() {
        return Err(ConflictError::UnknownCountry(enemy));
    }
    let player_attrition = war.attrition_of(proposer).unwrap_or(0.0);
    let enemy_attrition = war.attrition_of(&enemy).unwrap_or(0.0);

    let chance = likelihood(term, player_attrition, enemy_attrition);
    log.add_event(
        ConflictEvent::PeaceProposed {
            war: war_id,
            proposer: proposer.clone(),
            term,
            likelihood: chance,
        },
        date,
    );

    match resolve(chance, rng) {
        PeaceResponse::Accepted => {
            let settlement = engine.apply_peace_terms(
                war_id,
                term,
                proposer,
                SettlementKind::Negotiated,
                countries,
                date,
                log,
            )?;
            Ok(NegotiationResult {
                response: PeaceResponse::Accepted,
                likelihood: chance,
                term,
                settlement: Some(settlement),
                impact: term.impact(),
            })
        }
        PeaceResponse::Rejected => {
            tracing::debug!("{} rejected {} in {} (p={:.2})", enemy, term.name(), war_id, chance);
            log.add_event(ConflictEvent::PeaceRejected { war: war_id, term }, date);
            Ok(NegotiationResult {
                response: PeaceResponse::Rejected,
                likelihood: chance,
                term,
                settlement: None,
                impact: PoliticalImpact::NONE,
            })
        }
    }
}

/// Unconditional surrender by `surrendering`. Always succeeds for a war in
/// progress; the enemy imposes the harshest term the attrition gap allows.
pub fn surrender(
    engine: &mut WarEngine,
    war_id: WarId,
    surrendering: &CountryCode,
    countries: &CountryRegistry,
    date: GameDate,
    log: &mut EventLog,
) -> Result<NegotiationResult> {
    let war = engine.war(war_id).ok_or(ConflictError::WarNotFound(war_id))?;
    if war.is_concluded() {
        return Err(ConflictError::AlreadyConcluded(war_id));
    }
    let victor = war
        .opponent_of(surrendering)
        .cloned()
        .ok_or_else(|| ConflictError::NotBelligerent {
            war: war_id,
            country: surrendering.clone(),
        })?;
    let loser_attrition = war.attrition_of(surrendering).unwrap_or(0.0);
    let victor_attrition = war.attrition_of(&victor).unwrap_or(0.0);
    let term = surrender_term(loser_attrition, victor_attrition);

    let settlement = engine.apply_peace_terms(
        war_id,
        term,
        &victor,
        SettlementKind::Surrender,
        countries,
        date,
        log,
    )?;

    Ok(NegotiationResult {
        response: PeaceResponse::Accepted,
        likelihood: 1.0,
        term,
        settlement: Some(settlement),
        impact: SURRENDER_PENALTY,
    })
}
