//! Simulation output and serialization

use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::error::Result;
use crate::core::treasury::Treasury;
use crate::events::{ConflictEvent, EventLog};
use crate::territory::{Rebellion, ReparationAgreement, Territory};
use crate::war::War;

use super::leader::Leader;
use super::state::GameState;

/// Snapshot of a campaign for reporting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub final_date: GameDate,
    pub leader: Leader,
    pub treasury_balance: f64,
    pub wars: Vec<War>,
    pub territories: Vec<Territory>,
    pub rebellions: Vec<Rebellion>,
    pub agreements: Vec<ReparationAgreement>,
    pub history: EventLog,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub days_simulated: u32,
    pub total_events: u32,
    pub wars_declared: u32,
    pub wars_concluded: u32,
    pub territories_annexed: u32,
    pub rebellions_started: u32,
    pub rebellions_suppressed: u32,
    pub reparations_paid: f64,
}

impl SimulationOutput {
    pub fn new(state: &GameState, days: u32) -> Self {
        let events = &state.log.events;
        let count = |pred: fn(&ConflictEvent) -> bool| {
            events.iter().filter(|e| pred(&e.event_type)).count() as u32
        };

        let reparations_paid = events
            .iter()
            .filter_map(|e| match &e.event_type {
                ConflictEvent::ReparationPaid { amount, .. } => Some(*amount),
                _ => None,
            })
            .sum();

        let statistics = SimulationStats {
            days_simulated: days,
            total_events: events.len() as u32,
            wars_declared: count(|e| matches!(e, ConflictEvent::WarDeclared { .. })),
            wars_concluded: count(|e| matches!(e, ConflictEvent::WarConcluded { .. })),
            territories_annexed: count(|e| matches!(e, ConflictEvent::TerritoryAnnexed { .. })),
            rebellions_started: count(|e| matches!(e, ConflictEvent::RebellionStarted { .. })),
            rebellions_suppressed: count(|e| {
                matches!(e, ConflictEvent::RebellionSuppressed { .. })
            }),
            reparations_paid,
        };

        let mut wars: Vec<War> = state.wars.history().to_vec();
        wars.extend(state.wars.active_wars().iter().cloned());

        Self {
            final_date: state.date,
            leader: state.leader.clone(),
            treasury_balance: state.treasury.balance(),
            wars,
            territories: state.territories.territories().to_vec(),
            rebellions: state.territories.active_rebellions().to_vec(),
            agreements: state.territories.agreements().to_vec(),
            history: state.log.clone(),
            statistics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulated {} days (to {})\n{} events, {} wars declared, {} concluded\n\
             {} territories held, {} rebellions ({} suppressed), {} active\n\
             Leader: approval {:.1}, reputation {:.1}, stress {:.1}\n\
             Treasury: {:.0}",
            self.statistics.days_simulated,
            self.final_date,
            self.statistics.total_events,
            self.statistics.wars_declared,
            self.statistics.wars_concluded,
            self.territories.len(),
            self.statistics.rebellions_started,
            self.statistics.rebellions_suppressed,
            self.rebellions.len(),
            self.leader.approval,
            self.leader.reputation,
            self.leader.stress,
            self.treasury_balance,
        )
    }
}
