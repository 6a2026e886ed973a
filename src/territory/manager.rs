//! Territory manager: annexation, morale drift, rebellions and reparations

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::config::{ConflictConfig, TerritoryConfig};
use crate::core::country::CountryRegistry;
use crate::core::error::{ConflictError, Result};
use crate::core::treasury::Treasury;
use crate::core::types::{AgreementId, CountryCode, MilitaryStatus, RebellionId, TerritoryId, WarId};
use crate::events::{ConflictEvent, EventLog};
use crate::war::engine::PeaceSettlement;

use super::rebellion::{
    initial_rebel_strength, suppression_probability, Rebellion, SuppressionOutcome,
};
use super::reparation::{ReparationAgreement, ReparationPayment};
use super::territory::{Territory, TerritoryKind};

/// Owns every territory, rebellion and reparation agreement. The only
/// place where land changes hands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryManager {
    config: TerritoryConfig,
    territories: Vec<Territory>,
    rebellions: Vec<Rebellion>,
    agreements: Vec<ReparationAgreement>,
    completed_agreements: Vec<ReparationAgreement>,
    last_updated: Option<GameDate>,
    next_territory_id: u32,
    next_rebellion_id: u32,
    next_agreement_id: u32,
}

impl TerritoryManager {
    pub fn new(config: &ConflictConfig) -> Self {
        Self {
            config: config.territory.clone(),
            territories: Vec::new(),
            rebellions: Vec::new(),
            agreements: Vec::new(),
            completed_agreements: Vec::new(),
            last_updated: None,
            next_territory_id: 1,
            next_rebellion_id: 1,
            next_agreement_id: 1,
        }
    }

    // ---- Queries ----

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.iter().find(|t| t.id == id)
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn territories_owned_by<'a>(
        &'a self,
        owner: &'a CountryCode,
    ) -> impl Iterator<Item = &'a Territory> + 'a {
        self.territories.iter().filter(move |t| &t.owner == owner)
    }

    pub fn active_rebellions(&self) -> &[Rebellion] {
        &self.rebellions
    }

    pub fn rebellion(&self, id: RebellionId) -> Option<&Rebellion> {
        self.rebellions.iter().find(|r| r.id == id)
    }

    pub fn rebellion_in(&self, territory: TerritoryId) -> Option<&Rebellion> {
        self.rebellions.iter().find(|r| r.territory == territory)
    }

    pub fn agreements(&self) -> &[ReparationAgreement] {
        &self.agreements
    }

    pub fn completed_agreements(&self) -> &[ReparationAgreement] {
        &self.completed_agreements
    }

    /// Total area held by `owner` outside its base territory
    pub fn held_area(&self, owner: &CountryCode) -> f64 {
        self.territories_owned_by(owner).map(|t| t.area).sum()
    }

    /// GDP that `owner` draws from its held territories
    pub fn gdp_contribution(&self, owner: &CountryCode, countries: &CountryRegistry) -> f64 {
        self.territories_owned_by(owner)
            .map(|t| {
                let former_gdp = countries.gdp(&t.former_owner).unwrap_or(0.0);
                t.gdp_contribution(former_gdp, self.rebellion_in(t.id).is_some())
            })
            .sum()
    }

    // ---- Ownership ----

    /// Take control of land ceded by `former_owner`
    #[allow(clippy::too_many_arguments)]
    pub fn annex(
        &mut self,
        name: &str,
        former_owner: &CountryCode,
        new_owner: &CountryCode,
        size: f64,
        area: f64,
        population: u64,
        date: GameDate,
        log: &mut EventLog,
    ) -> TerritoryId {
        let id = TerritoryId(self.next_territory_id);
        self.next_territory_id += 1;

        self.territories.push(Territory::new(
            id,
            name.to_string(),
            former_owner.clone(),
            new_owner.clone(),
            size,
            area,
            population,
            date,
            self.config.initial_morale,
        ));

        log.add_event(
            ConflictEvent::TerritoryAnnexed {
                territory: id,
                from: former_owner.clone(),
                to: new_owner.clone(),
            },
            date,
        );
        tracing::info!("{} annexed {} ({:.1}% of {})", new_owner, id, size * 100.0, former_owner);
        id
    }

    /// Annex whatever land a settlement ceded. Returns None when nothing
    /// changed hands.
    pub fn annex_settlement(
        &mut self,
        settlement: &PeaceSettlement,
        countries: &CountryRegistry,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<Option<TerritoryId>> {
        if settlement.territory_fraction <= 0.0 {
            return Ok(None);
        }
        let loser = countries
            .get(&settlement.loser)
            .ok_or_else(|| ConflictError::UnknownCountry(settlement.loser.clone()))?;

        let name = format!("Occupied {} {}", loser.name, self.next_territory_id);
        let population = (loser.population as f64 * settlement.territory_fraction).round() as u64;
        let id = self.annex(
            &name,
            &settlement.loser,
            &settlement.victor,
            settlement.territory_fraction,
            settlement.territory_transferred,
            population,
            date,
            log,
        );
        Ok(Some(id))
    }

    // ---- Daily update ----

    /// Advance every territory to `date`. Repeating a date is a no-op.
    pub fn tick(&mut self, date: GameDate, log: &mut EventLog) {
        match self.last_updated {
            Some(last) => {
                let days = date.days_since(last);
                if days == 0 {
                    return;
                }
                for offset in 1..=days {
                    self.step_day(last.add_days(offset), log);
                }
            }
            None => self.step_day(date, log),
        }
        self.last_updated = Some(date);
    }

    fn step_day(&mut self, date: GameDate, log: &mut EventLog) {
        let mut uprisings = Vec::new();
        let mut collapsed = Vec::new();

        for territory in &mut self.territories {
            let drift = match territory.kind {
                TerritoryKind::Conquered => self.config.conquered_morale_drift,
                TerritoryKind::Autonomous => self.config.autonomous_morale_drift,
                TerritoryKind::Core => 0.0,
            };
            territory.adjust_morale(drift);

            let active = self.rebellions.iter().find(|r| r.territory == territory.id);
            let threshold = self.config.rebellion_risk_threshold;
            match active {
                Some(rebellion) if territory.rebellion_risk < threshold => {
                    collapsed.push(rebellion.id);
                }
                None if territory.rebellion_risk >= threshold => {
                    uprisings.push(territory.id);
                }
                _ => {}
            }
        }

        for rebellion_id in collapsed {
            if let Some(pos) = self.rebellions.iter().position(|r| r.id == rebellion_id) {
                let rebellion = self.rebellions.remove(pos);
                log.add_event(
                    ConflictEvent::RebellionCollapsed {
                        rebellion: rebellion.id,
                        territory: rebellion.territory,
                    },
                    date,
                );
                tracing::info!("{} in {} collapsed", rebellion.id, rebellion.territory);
            }
        }

        for territory_id in uprisings {
            if let Err(e) = self.spawn_rebellion(territory_id, date, log) {
                tracing::warn!("Uprising in {} did not start: {}", territory_id, e);
            }
        }

        for rebellion in &mut self.rebellions {
            if let Some(territory) = self.territories.iter().find(|t| t.id == rebellion.territory) {
                rebellion.support = 1.0 - territory.morale;
            }
        }
    }

    // ---- Rebellions ----

    /// Start an uprising in a territory whose risk has crossed the threshold
    pub fn spawn_rebellion(
        &mut self,
        territory_id: TerritoryId,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<RebellionId> {
        let territory = self
            .territory(territory_id)
            .ok_or(ConflictError::TerritoryNotFound(territory_id))?;
        if self.rebellion_in(territory_id).is_some() {
            return Err(ConflictError::RebellionActive(territory_id));
        }
        if territory.rebellion_risk < self.config.rebellion_risk_threshold {
            return Err(ConflictError::RiskBelowThreshold {
                territory: territory_id,
                risk: territory.rebellion_risk,
                threshold: self.config.rebellion_risk_threshold,
            });
        }

        let support = 1.0 - territory.morale;
        let strength =
            initial_rebel_strength(territory.population, support, self.config.rebel_mobilization);

        let id = RebellionId(self.next_rebellion_id);
        self.next_rebellion_id += 1;
        self.rebellions.push(Rebellion {
            id,
            territory: territory_id,
            strength,
            support,
            started_on: date,
        });

        log.add_event(
            ConflictEvent::RebellionStarted {
                rebellion: id,
                territory: territory_id,
                strength,
            },
            date,
        );
        tracing::info!("{} broke out in {} with {} rebels", id, territory_id, strength);
        Ok(id)
    }

    /// Send troops against a rebellion. Cost is paid up front; a failed
    /// roll still returns `Ok` with `success == false`.
    pub fn suppress_rebellion<T: Treasury, R: Rng>(
        &mut self,
        rebellion_id: RebellionId,
        military: MilitaryStatus,
        treasury: &mut T,
        rng: &mut R,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<SuppressionOutcome> {
        let pos = self
            .rebellions
            .iter()
            .position(|r| r.id == rebellion_id)
            .ok_or(ConflictError::RebellionNotFound(rebellion_id))?;
        let military_strength = military.strength().ok_or(ConflictError::NoMilitary)?;

        let rebellion = &self.rebellions[pos];
        let territory_id = rebellion.territory;
        let rebels = rebellion.strength;
        let cost = rebels as f64 * self.config.suppression_cost_per_rebel;
        treasury.debit(cost, &format!("Suppression of {}", rebellion_id))?;

        let probability = suppression_probability(
            military_strength,
            rebels,
            self.config.suppression_base_chance,
            self.config.suppression_max_chance,
        );
        let casualties = (rebels as f64 * self.config.suppression_casualty_rate).round() as u32;
        let success = rng.gen::<f64>() < probability;

        let morale_gain = self.config.suppression_morale_gain;
        let growth = self.config.failed_suppression_growth;

        if success {
            self.rebellions.remove(pos);
            if let Some(territory) = self.territories.iter_mut().find(|t| t.id == territory_id) {
                territory.adjust_morale(morale_gain);
            }
            log.add_event(
                ConflictEvent::RebellionSuppressed {
                    rebellion: rebellion_id,
                    territory: territory_id,
                    casualties,
                },
                date,
            );
            tracing::info!("{} suppressed (p={:.2})", rebellion_id, probability);
        } else {
            let rebellion = &mut self.rebellions[pos];
            let grown = (rebellion.strength as f64 * (1.0 + growth)).round();
            rebellion.strength = grown.min(u32::MAX as f64) as u32;
            log.add_event(
                ConflictEvent::SuppressionFailed {
                    rebellion: rebellion_id,
                    territory: territory_id,
                    casualties,
                },
                date,
            );
            tracing::info!(
                "{} survived suppression (p={:.2}), now {} rebels",
                rebellion_id,
                probability,
                rebellion.strength
            );
        }

        Ok(SuppressionOutcome {
            success,
            probability,
            cost,
            casualties,
        })
    }

    // ---- Player actions ----

    pub fn grant_autonomy(
        &mut self,
        territory_id: TerritoryId,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<()> {
        let gdp_factor = self.config.autonomy_gdp_factor;
        let morale_gain = self.config.autonomy_morale_gain;

        let territory = self
            .territories
            .iter_mut()
            .find(|t| t.id == territory_id)
            .ok_or(ConflictError::TerritoryNotFound(territory_id))?;
        if territory.kind == TerritoryKind::Autonomous {
            return Err(ConflictError::AlreadyAutonomous(territory_id));
        }

        territory.kind = TerritoryKind::Autonomous;
        territory.gdp_multiplier *= gdp_factor;
        territory.adjust_morale(morale_gain);

        // Self-rule settles any uprising
        self.rebellions.retain(|r| r.territory != territory_id);

        log.add_event(ConflictEvent::AutonomyGranted { territory: territory_id }, date);
        tracing::info!("{} granted autonomy", territory_id);
        Ok(())
    }

    /// Release a territory entirely. Returns what was given up.
    pub fn grant_independence(
        &mut self,
        territory_id: TerritoryId,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<Territory> {
        let pos = self
            .territories
            .iter()
            .position(|t| t.id == territory_id)
            .ok_or(ConflictError::TerritoryNotFound(territory_id))?;

        let territory = self.territories.remove(pos);
        self.rebellions.retain(|r| r.territory != territory_id);

        log.add_event(
            ConflictEvent::IndependenceGranted {
                territory: territory_id,
                name: territory.name.clone(),
            },
            date,
        );
        tracing::info!("{} ({}) granted independence", territory_id, territory.name);
        Ok(territory)
    }

    /// Spend money on a territory to raise morale. Returns the new morale.
    pub fn invest_in_territory<T: Treasury>(
        &mut self,
        territory_id: TerritoryId,
        amount: f64,
        treasury: &mut T,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<f64> {
        let min_treasury = self.config.min_investment_treasury;
        let morale_gain = self.config.investment_morale_gain;

        let territory = self
            .territories
            .iter_mut()
            .find(|t| t.id == territory_id)
            .ok_or(ConflictError::TerritoryNotFound(territory_id))?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConflictError::InvalidAmount(amount));
        }
        if territory.morale >= 1.0 {
            return Err(ConflictError::MoraleAtMaximum(territory_id));
        }
        if treasury.balance() < min_treasury {
            return Err(ConflictError::TreasuryBelowMinimum {
                balance: treasury.balance(),
                required: min_treasury,
            });
        }
        treasury.debit(amount, &format!("Investment in {}", territory.name))?;

        territory.adjust_morale(morale_gain);
        let morale = territory.morale;

        log.add_event(
            ConflictEvent::TerritoryInvestment {
                territory: territory_id,
                amount,
                morale,
            },
            date,
        );
        tracing::debug!("Invested {:.0} in {}, morale now {:.2}", amount, territory_id, morale);
        Ok(morale)
    }

    // ---- Reparations ----

    pub fn schedule_reparations(
        &mut self,
        payer: &CountryCode,
        recipient: &CountryCode,
        total: f64,
        war: WarId,
        date: GameDate,
        log: &mut EventLog,
    ) -> Result<AgreementId> {
        if !total.is_finite() || total <= 0.0 {
            return Err(ConflictError::InvalidAmount(total));
        }
        let id = AgreementId(self.next_agreement_id);
        self.next_agreement_id += 1;

        self.agreements.push(ReparationAgreement::new(
            id,
            payer.clone(),
            recipient.clone(),
            total,
            self.config.reparation_years,
            war,
            date,
        ));

        log.add_event(
            ConflictEvent::ReparationsScheduled {
                agreement: id,
                payer: payer.clone(),
                recipient: recipient.clone(),
                total,
            },
            date,
        );
        tracing::info!(
            "{}: {} owes {} {:.0} over {} years",
            id,
            payer,
            recipient,
            total,
            self.config.reparation_years
        );
        Ok(id)
    }

    /// Pay every installment that has fallen due by `date`. The player's
    /// side moves money through `treasury`; an installment the player
    /// cannot cover stays due and is retried on the next call.
    pub fn process_reparations<T: Treasury>(
        &mut self,
        date: GameDate,
        player: &CountryCode,
        treasury: &mut T,
        log: &mut EventLog,
    ) -> Vec<ReparationPayment> {
        let mut payments = Vec::new();

        for agreement in &mut self.agreements {
            for _ in 0..agreement.payments_due(date) {
                let amount = agreement.yearly_payment;
                let description = format!("Reparations {}", agreement.id);

                if &agreement.payer == player {
                    if let Err(e) = treasury.debit(amount, &description) {
                        tracing::warn!("{} installment missed: {}", agreement.id, e);
                        break;
                    }
                } else if &agreement.recipient == player {
                    treasury.credit(amount, &description);
                }

                agreement.years_paid += 1;
                log.add_event(
                    ConflictEvent::ReparationPaid {
                        agreement: agreement.id,
                        payer: agreement.payer.clone(),
                        recipient: agreement.recipient.clone(),
                        amount,
                    },
                    date,
                );
                payments.push(ReparationPayment {
                    agreement: agreement.id,
                    payer: agreement.payer.clone(),
                    recipient: agreement.recipient.clone(),
                    amount,
                });
            }
        }

        let (done, open): (Vec<_>, Vec<_>) =
            self.agreements.drain(..).partition(|a| a.is_complete());
        self.agreements = open;
        for agreement in done {
            log.add_event(ConflictEvent::ReparationsCompleted { agreement: agreement.id }, date);
            self.completed_agreements.push(agreement);
        }

        payments
    }
}
