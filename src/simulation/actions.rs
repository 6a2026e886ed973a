//! Player actions on the composed state

use crate::core::error::{ConflictError, Result};
use crate::core::types::{CountryCode, RebellionId, TerritoryId, WarId};
use crate::territory::{SuppressionOutcome, Territory};
use crate::war::peace::{self, NegotiationResult};
use crate::war::{PeaceTerm, WarJustification, WarStrategy, WarType};

use super::state::GameState;

impl GameState {
    /// The leader's country attacks `defender`
    pub fn declare_war(
        &mut self,
        defender: &CountryCode,
        justification: WarJustification,
    ) -> Result<WarId> {
        let attacker_strength = self.leader.military.strength().ok_or(ConflictError::NoMilitary)?;
        let defender_strength = self
            .countries
            .get(defender)
            .ok_or_else(|| ConflictError::UnknownCountry(defender.clone()))?
            .military
            .strength()
            .unwrap_or(0);

        let id = self.wars.declare_war(
            &self.leader.country,
            defender,
            WarType::Offensive,
            justification,
            attacker_strength,
            defender_strength,
            self.date,
            &mut self.log,
        )?;
        self.leader.apply(justification.declaration_impact());
        Ok(id)
    }

    /// Another country attacks the leader's. The leader directs the
    /// defence, so the war is recorded as defensive.
    pub fn enemy_declares_war(
        &mut self,
        attacker: &CountryCode,
        justification: WarJustification,
    ) -> Result<WarId> {
        let attacker_strength = self
            .countries
            .get(attacker)
            .ok_or_else(|| ConflictError::UnknownCountry(attacker.clone()))?
            .military
            .strength()
            .ok_or(ConflictError::NoMilitary)?;
        let defender_strength = self.leader.military.strength().unwrap_or(0);

        self.wars.declare_war(
            attacker,
            &self.leader.country,
            WarType::Defensive,
            justification,
            attacker_strength,
            defender_strength,
            self.date,
            &mut self.log,
        )
    }

    pub fn change_strategy(&mut self, war: WarId, strategy: WarStrategy) -> Result<()> {
        let controller = self
            .wars
            .war(war)
            .ok_or(ConflictError::WarNotFound(war))?
            .controlling_side();
        if controller != &self.leader.country {
            return Err(ConflictError::NotBelligerent {
                war,
                country: self.leader.country.clone(),
            });
        }
        self.wars.change_strategy(war, strategy, self.date, &mut self.log)
    }

    /// Offer terms to the enemy. An accepted offer is carried out at once.
    pub fn propose_peace(&mut self, war: WarId, term: PeaceTerm) -> Result<NegotiationResult> {
        let result = peace::propose(
            &mut self.wars,
            war,
            term,
            &self.leader.country,
            &self.countries,
            self.date,
            &mut self.rng,
            &mut self.log,
        )?;

        self.leader.apply(result.impact);
        if let Some(settlement) = &result.settlement {
            self.settle(settlement)?;
        }
        Ok(result)
    }

    pub fn surrender(&mut self, war: WarId) -> Result<NegotiationResult> {
        let result = peace::surrender(
            &mut self.wars,
            war,
            &self.leader.country,
            &self.countries,
            self.date,
            &mut self.log,
        )?;

        self.leader.apply(result.impact);
        if let Some(settlement) = &result.settlement {
            self.settle(settlement)?;
        }
        Ok(result)
    }

    pub fn suppress_rebellion(&mut self, rebellion: RebellionId) -> Result<SuppressionOutcome> {
        let outcome = self.territories.suppress_rebellion(
            rebellion,
            self.leader.military,
            &mut self.treasury,
            &mut self.rng,
            self.date,
            &mut self.log,
        )?;
        self.leader.take_losses(outcome.casualties as u64);
        Ok(outcome)
    }

    pub fn grant_autonomy(&mut self, territory: TerritoryId) -> Result<()> {
        self.territories.grant_autonomy(territory, self.date, &mut self.log)
    }

    pub fn grant_independence(&mut self, territory: TerritoryId) -> Result<Territory> {
        self.territories.grant_independence(territory, self.date, &mut self.log)
    }

    /// Returns the territory's new morale
    pub fn invest_in_territory(&mut self, territory: TerritoryId, amount: f64) -> Result<f64> {
        self.territories
            .invest_in_territory(territory, amount, &mut self.treasury, self.date, &mut self.log)
    }
}
