//! War lifecycle engine
//!
//! Owns every active war. Wars are declared, advanced day by day by `tick`,
//! settled by peace terms or decisive victory, and finally moved to an
//! immutable history.

use serde::{Deserialize, Serialize};

use crate::core::calendar::{GameDate, DAYS_PER_WEEK};
use crate::core::config::{ConflictConfig, ExhaustionConfig, WarConfig};
use crate::core::country::CountryRegistry;
use crate::core::error::{ConflictError, Result};
use crate::core::types::{CountryCode, PoliticalImpact, WarId};
use crate::events::{ConflictEvent, EventLog};
use crate::war::attrition::{
    compute_attrition, compute_exhaustion, conquest_rate, daily_casualties, daily_cost,
    ExhaustionTier,
};
use crate::war::peace::PeaceTerm;
use crate::war::state::{War, WarJustification, WarOutcome, WarType};
use crate::war::strategy::WarStrategy;

/// How a peace was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementKind {
    Negotiated,
    Surrender,
}

/// What a concluded war transfers from loser to victor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeaceSettlement {
    pub war: WarId,
    /// None for a decisive victory, which ends without negotiated terms
    pub term: Option<PeaceTerm>,
    pub victor: CountryCode,
    pub loser: CountryCode,
    /// Fraction of the loser's base territory ceded
    pub territory_fraction: f64,
    /// Ceded area in the loser's territory units
    pub territory_transferred: f64,
    pub reparation_amount: f64,
}

/// Political effect of one war on its controlling country during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarImpact {
    pub war: WarId,
    pub country: CountryCode,
    pub impact: PoliticalImpact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub impacts: Vec<WarImpact>,
    /// Wars that ended in decisive victory during this tick
    pub concluded: Vec<WarId>,
}

impl TickReport {
    /// Total impact on `country` across all its wars
    pub fn impact_for(&self, country: &CountryCode) -> PoliticalImpact {
        self.impacts
            .iter()
            .filter(|i| &i.country == country)
            .fold(PoliticalImpact::NONE, |acc, i| acc + i.impact)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarEngine {
    war_config: WarConfig,
    exhaustion_config: ExhaustionConfig,
    active: Vec<War>,
    history: Vec<War>,
    next_war_id: u32,
}

impl WarEngine {
    pub fn new(config: &ConflictConfig) -> Self {
        Self {
            war_config: config.war.clone(),
            exhaustion_config: config.exhaustion.clone(),
            active: Vec::new(),
            history: Vec::new(),
            next_war_id: 1,
        }
    }

    pub fn war(&self, id: WarId) -> Option<&War> {
        self.active.iter().find(|w| w.id == id)
    }

    /// Look up a war in the active set or in history
    pub fn find_any(&self, id: WarId) -> Option<&War> {
        self.war(id).or_else(|| self.history.iter().find(|w| w.id == id))
    }

    pub fn active_wars(&self) -> &[War] {
        &self.active
    }

    pub fn history(&self) -> &[War] {
        &self.history
    }

    pub fn wars_involving<'a>(&'a self, country: &'a CountryCode) -> impl Iterator<Item = &'a War> {
        self.active.iter().filter(move |w| w.involves(country))
    }

    /// Wars still being fought by `country`
    pub fn active_war_count(&self, country: &CountryCode) -> usize {
        self.wars_involving(country).filter(|w| !w.is_concluded()).count()
    }

    pub fn exhaustion_tier(&self, id: WarId) -> Option<ExhaustionTier> {
        self.war(id).map(|w| w.exhaustion_tier(&self.exhaustion_config))
    }

    fn check_declaration(
        &self,
        attacker: &CountryCode,
        defender: &CountryCode,
        attacker_strength: u64,
    ) -> Result<()> {
        if attacker == defender {
            return Err(ConflictError::SameCountry(attacker.clone()));
        }
        let active = self.active_war_count(attacker);
        if active >= self.war_config.max_active_wars {
            return Err(ConflictError::TooManyActiveWars {
                country: attacker.clone(),
                active,
                limit: self.war_config.max_active_wars,
            });
        }
        if attacker_strength < self.war_config.min_declaration_strength {
            return Err(ConflictError::InsufficientStrength {
                strength: attacker_strength,
                required: self.war_config.min_declaration_strength,
            });
        }
        Ok(())
    }

    /// Same guard `declare_war` applies, without side effects
    pub fn can_declare_war(
        &self,
        attacker: &CountryCode,
        defender: &CountryCode,
        attacker_strength: u64,
    ) -> bool {
        self.check_declaration(attacker, defender, attacker_strength).is_ok()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn declare_war(
        &mut self,
        attacker: &CountryCode,
        defender: &CountryCode,
        war_type: WarType,
        justification: WarJustification,
        attacker_strength: u64,
        defender_strength: u64,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<WarId> {
        self.check_declaration(attacker, defender, attacker_strength)?;

        let id = WarId(self.next_war_id);
        self.next_war_id += 1;

        self.active.push(War::new(
            id,
            attacker.clone(),
            defender.clone(),
            war_type,
            justification,
            attacker_strength,
            defender_strength,
            date,
            self.war_config.transition_duration_days,
        ));

        tracing::info!("{} declared war on {} ({:?}) as {}", attacker, defender, justification, id);
        log.add_event(
            ConflictEvent::WarDeclared {
                war: id,
                attacker: attacker.clone(),
                defender: defender.clone(),
                justification,
            },
            date,
        );

        Ok(id)
    }

    pub fn change_strategy(
        &mut self,
        id: WarId,
        strategy: WarStrategy,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<()> {
        let war = self
            .active
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ConflictError::WarNotFound(id))?;
        if war.is_concluded() {
            return Err(ConflictError::AlreadyConcluded(id));
        }

        let from = war.strategy.target.unwrap_or(war.strategy.current);
        war.strategy.select(strategy, date)?;

        tracing::debug!("{}: strategy {} -> {}", id, from.name(), strategy.name());
        log.add_event(ConflictEvent::StrategyChanged { war: id, from, to: strategy }, date);
        Ok(())
    }

    /// Run the daily model for every war up to and including `date`.
    ///
    /// Each war remembers the last day it was advanced to, so calling this
    /// twice with the same date changes nothing the second time.
    pub fn tick(&mut self, date: GameDate, log: &mut EventLog) -> TickReport {
        let mut report = TickReport::default();

        for war in self.active.iter_mut().filter(|w| !w.is_concluded()) {
            if date <= war.last_updated {
                continue;
            }

            // Work on a copy so a war is either fully advanced or untouched
            let mut next = war.clone();
            let mut events = Vec::new();
            let mut impact = PoliticalImpact::NONE;

            let mut day = war.last_updated;
            while day < date && !next.is_concluded() {
                day = day.next();
                step_day(
                    &mut next,
                    day,
                    &self.war_config,
                    &self.exhaustion_config,
                    &mut events,
                    &mut impact,
                );
            }
            next.last_updated = day;

            if !impact.is_zero() {
                report.impacts.push(WarImpact {
                    war: next.id,
                    country: next.controlling_side().clone(),
                    impact,
                });
            }
            if next.is_concluded() {
                report.concluded.push(next.id);
            }

            tracing::debug!(
                "{} advanced to {}: exhaustion {:.3}, attrition {:.3}/{:.3}",
                next.id,
                day,
                next.exhaustion,
                next.attacker_attrition,
                next.defender_attrition
            );

            *war = next;
            for (event, when) in events {
                log.add_event(event, when);
            }
        }

        report
    }

    /// Conclude war `id` with `term` imposed by `victor`.
    ///
    /// The war stays in the active set until `end_war` is called.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_peace_terms(
        &mut self,
        id: WarId,
        term: PeaceTerm,
        victor: &CountryCode,
        kind: SettlementKind,
        countries: &CountryRegistry,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<PeaceSettlement> {
        let war = self
            .active
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ConflictError::WarNotFound(id))?;
        if war.is_concluded() {
            return Err(ConflictError::AlreadyConcluded(id));
        }
        let loser = war
            .opponent_of(victor)
            .cloned()
            .ok_or_else(|| ConflictError::NotBelligerent {
                war: id,
                country: victor.clone(),
            })?;
        let loser_profile = countries
            .get(&loser)
            .ok_or_else(|| ConflictError::UnknownCountry(loser.clone()))?;

        // Land held at the table is ceded as it stands; only the occupier
        // can have taken any
        let fraction = match term {
            PeaceTerm::StatusQuo => 0.0,
            _ if victor == war.controlling_side() => war
                .territory_conquered
                .unwrap_or_else(|| term.territory_percent()),
            _ => term.territory_percent(),
        };
        let settlement = PeaceSettlement {
            war: id,
            term: Some(term),
            victor: victor.clone(),
            loser: loser.clone(),
            territory_fraction: fraction,
            territory_transferred: loser_profile.base_territory * fraction,
            reparation_amount: term.reparation_amount(loser_profile.gdp),
        };

        let outcome = match kind {
            SettlementKind::Negotiated => WarOutcome::PeaceTreaty { victor: victor.clone() },
            SettlementKind::Surrender => WarOutcome::Surrender { loser },
        };
        war.outcome = Some(outcome.clone());
        war.peace_term = Some(term);
        war.territory_conquered = Some(fraction);
        war.end_date = Some(date);

        tracing::info!("{} concluded: {:?} with {}", id, outcome, term.name());
        log.add_event(ConflictEvent::WarConcluded { war: id, outcome }, date);

        Ok(settlement)
    }

    /// Settlement implied by a concluded war, including decisive victories
    pub fn settlement_for(
        &self,
        id: WarId,
        countries: &CountryRegistry,
    ) -> Option<PeaceSettlement> {
        let war = self.find_any(id)?;
        let outcome = war.outcome.as_ref()?;
        let victor = outcome.victor(war).clone();
        let loser = war.opponent_of(&victor)?.clone();
        let profile = countries.get(&loser)?;
        let fraction = war.territory_conquered.unwrap_or(0.0);

        Some(PeaceSettlement {
            war: id,
            term: war.peace_term,
            victor,
            loser,
            territory_fraction: fraction,
            territory_transferred: profile.base_territory * fraction,
            reparation_amount: war
                .peace_term
                .map(|t| t.reparation_amount(profile.gdp))
                .unwrap_or(0.0),
        })
    }

    /// Move a concluded war into history
    pub fn end_war(&mut self, id: WarId) -> Result<War> {
        let idx = self
            .active
            .iter()
            .position(|w| w.id == id)
            .ok_or(ConflictError::WarNotFound(id))?;
        if !self.active[idx].is_concluded() {
            return Err(ConflictError::NotConcluded(id));
        }
        let war = self.active.remove(idx);
        self.history.push(war.clone());
        Ok(war)
    }
}

/// Advance one war by a single day
fn step_day(
    war: &mut War,
    day: GameDate,
    config: &WarConfig,
    exhaustion: &ExhaustionConfig,
    events: &mut Vec<(ConflictEvent, GameDate)>,
    impact: &mut PoliticalImpact,
) {
    if let Some(strategy) = war.strategy.advance(day) {
        events.push((ConflictEvent::StrategyTransitionCompleted { war: war.id, strategy }, day));
    }

    let controller = war.controlling_side().clone();
    let Some(opponent) = war.opponent_of(&controller).cloned() else {
        return;
    };
    let mults = war.strategy.effective_multipliers(day);
    let baseline = WarStrategy::Balanced.multipliers();

    let own = war.current_strength_of(&controller);
    let enemy = war.current_strength_of(&opponent);

    // The controlling side sets the tempo for both armies
    let rate = config.daily_casualty_rate;
    let own_losses = daily_casualties(own, enemy, mults.attrition, rate).min(own);
    let enemy_losses = daily_casualties(enemy, own, mults.attrition, rate).min(enemy);

    *war.casualties.entry(controller.clone()).or_insert(0.0) += own_losses;
    *war.casualties.entry(opponent.clone()).or_insert(0.0) += enemy_losses;
    *war.costs.entry(controller.clone()).or_insert(0.0) +=
        daily_cost(own, mults.attrition, config.cost_per_soldier_day);
    *war.costs.entry(opponent.clone()).or_insert(0.0) +=
        daily_cost(enemy, baseline.attrition, config.cost_per_soldier_day);

    let initial =
        |country: &CountryCode| war.initial_strength_of(country).unwrap_or(1).max(1) as f64;
    let own_fraction = war.casualties_of(&controller) / initial(&controller);
    let enemy_fraction = war.casualties_of(&opponent) / initial(&opponent);
    let own_attrition = compute_attrition(own_fraction, mults.attrition);
    let enemy_attrition = compute_attrition(enemy_fraction, baseline.attrition);
    if controller == war.attacker {
        war.attacker_attrition = war.attacker_attrition.max(own_attrition);
        war.defender_attrition = war.defender_attrition.max(enemy_attrition);
    } else {
        war.defender_attrition = war.defender_attrition.max(own_attrition);
        war.attacker_attrition = war.attacker_attrition.max(enemy_attrition);
    }

    let old_tier = ExhaustionTier::from_exhaustion(war.exhaustion, exhaustion);
    war.exhaustion = compute_exhaustion(1, mults.exhaustion, war.exhaustion, exhaustion.daily_rate);
    let tier = ExhaustionTier::from_exhaustion(war.exhaustion, exhaustion);
    if tier > old_tier {
        tracing::info!("{} war exhaustion reached {}", war.id, tier.name());
        events.push((ConflictEvent::ExhaustionThresholdCrossed { war: war.id, tier }, day));
    }

    let own_after = war.current_strength_of(&controller);
    let enemy_after = war.current_strength_of(&opponent);
    war.occupied_fraction = (war.occupied_fraction
        + conquest_rate(own_after, enemy_after, mults.speed, config.base_conquest_rate))
    .min(1.0);
    if war.occupied_fraction > 0.0 {
        war.territory_conquered = Some(war.occupied_fraction);
    }

    let duration = war.duration_days(day);
    if duration > 0 && duration % DAYS_PER_WEEK == 0 {
        *impact += tier.weekly_impact();
    }

    let own_attrition = war.attrition_of(&controller).unwrap_or(0.0);
    let enemy_attrition = war.attrition_of(&opponent).unwrap_or(0.0);
    let victor = if enemy_attrition >= config.decisive_attrition || war.occupied_fraction >= 1.0 {
        Some((controller, war.occupied_fraction))
    } else if own_attrition >= config.decisive_attrition {
        Some((opponent, 0.0))
    } else {
        None
    };

    if let Some((victor, conquered)) = victor {
        let outcome = WarOutcome::DecisiveVictory { victor };
        war.outcome = Some(outcome.clone());
        war.territory_conquered = Some(conquered);
        war.end_date = Some(day);
        tracing::info!("{} ended in decisive victory: {:?}", war.id, outcome);
        events.push((ConflictEvent::WarConcluded { war: war.id, outcome }, day));
    }
}
