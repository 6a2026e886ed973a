//! Composed campaign state and the daily loop

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::config::ConflictConfig;
use crate::core::country::CountryRegistry;
use crate::core::error::{ConflictError, Result};
use crate::core::treasury::Ledger;
use crate::core::types::{PoliticalImpact, TerritoryId, WarId};
use crate::events::EventLog;
use crate::territory::{ReparationPayment, TerritoryManager};
use crate::war::{PeaceSettlement, WarEngine};

use super::leader::Leader;

/// Everything the conflict core needs for one campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: ConflictConfig,
    pub date: GameDate,
    pub leader: Leader,
    pub countries: CountryRegistry,
    pub wars: WarEngine,
    pub territories: TerritoryManager,
    pub treasury: Ledger,
    pub rng: ChaCha8Rng,
    pub log: EventLog,
}

/// What happened during one `advance_day`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub date: GameDate,
    /// Net effect on the leader from wars they control
    pub impact: PoliticalImpact,
    /// Wars that ended on their own today
    pub concluded: Vec<WarId>,
    pub annexed: Vec<TerritoryId>,
    pub payments: Vec<ReparationPayment>,
}

impl GameState {
    pub fn new(
        config: ConflictConfig,
        seed: u64,
        leader: Leader,
        countries: CountryRegistry,
        treasury: Ledger,
    ) -> Result<Self> {
        config.validate().map_err(ConflictError::Config)?;
        if countries.get(&leader.country).is_none() {
            return Err(ConflictError::UnknownCountry(leader.country.clone()));
        }

        Ok(Self {
            wars: WarEngine::new(&config),
            territories: TerritoryManager::new(&config),
            config,
            date: GameDate::START,
            leader,
            countries,
            treasury,
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: EventLog::new(),
        })
    }

    /// Advance the campaign by one day
    pub fn advance_day(&mut self) -> Result<DayReport> {
        self.date = self.date.next();
        let date = self.date;

        let fallen_before = self.leader_war_casualties();
        let tick = self.wars.tick(date, &mut self.log);
        let impact = tick.impact_for(&self.leader.country);
        self.leader.apply(impact);
        // Whole soldiers only; fractions carry over to the next day
        let fallen = self.leader_war_casualties().floor() - fallen_before.floor();
        self.leader.take_losses(fallen.max(0.0) as u64);

        let mut annexed = Vec::new();
        for &war in &tick.concluded {
            match self.wars.settlement_for(war, &self.countries) {
                Some(settlement) => annexed.extend(self.settle(&settlement)?),
                None => {
                    tracing::warn!(
                        "{} ended without a settlement: a belligerent is not in the registry",
                        war
                    );
                    self.wars.end_war(war)?;
                }
            }
        }

        self.territories.tick(date, &mut self.log);
        let payments = self
            .territories
            .process_reparations(date, &self.leader.country, &mut self.treasury, &mut self.log);

        Ok(DayReport {
            date,
            impact,
            concluded: tick.concluded,
            annexed,
            payments,
        })
    }

    /// Casualties the leader's country has taken across its active wars
    fn leader_war_casualties(&self) -> f64 {
        self.wars
            .wars_involving(&self.leader.country)
            .map(|w| w.casualties_of(&self.leader.country))
            .sum()
    }

    /// Carry out a settlement: schedule reparations, annex land the leader
    /// won, and retire the war.
    pub(crate) fn settle(&mut self, settlement: &PeaceSettlement) -> Result<Option<TerritoryId>> {
        if settlement.reparation_amount > 0.0 {
            self.territories.schedule_reparations(
                &settlement.loser,
                &settlement.victor,
                settlement.reparation_amount,
                settlement.war,
                self.date,
                &mut self.log,
            )?;
        }

        let annexed = if settlement.victor == self.leader.country {
            self.territories
                .annex_settlement(settlement, &self.countries, self.date, &mut self.log)?
        } else {
            None
        };

        self.wars.end_war(settlement.war)?;
        Ok(annexed)
    }
}
