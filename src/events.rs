//! Conflict events and the campaign log
//!
//! The core emits structured events; whatever renders popups reads them
//! from the log.

use serde::{Deserialize, Serialize};

use crate::core::calendar::GameDate;
use crate::core::types::{AgreementId, CountryCode, RebellionId, TerritoryId, WarId};
use crate::war::attrition::ExhaustionTier;
use crate::war::peace::PeaceTerm;
use crate::war::state::{WarJustification, WarOutcome};
use crate::war::strategy::WarStrategy;

/// A logged event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub date: GameDate,
    pub event_type: ConflictEvent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConflictEvent {
    // Wars
    WarDeclared {
        war: WarId,
        attacker: CountryCode,
        defender: CountryCode,
        justification: WarJustification,
    },
    StrategyChanged {
        war: WarId,
        from: WarStrategy,
        to: WarStrategy,
    },
    StrategyTransitionCompleted { war: WarId, strategy: WarStrategy },
    ExhaustionThresholdCrossed { war: WarId, tier: ExhaustionTier },
    WarConcluded { war: WarId, outcome: WarOutcome },

    // Diplomacy
    PeaceProposed {
        war: WarId,
        proposer: CountryCode,
        term: PeaceTerm,
        likelihood: f64,
    },
    PeaceRejected { war: WarId, term: PeaceTerm },
    ReparationsScheduled {
        agreement: AgreementId,
        payer: CountryCode,
        recipient: CountryCode,
        total: f64,
    },
    ReparationPaid {
        agreement: AgreementId,
        payer: CountryCode,
        recipient: CountryCode,
        amount: f64,
    },
    ReparationsCompleted { agreement: AgreementId },

    // Territory
    TerritoryAnnexed {
        territory: TerritoryId,
        from: CountryCode,
        to: CountryCode,
    },
    TerritoryInvestment {
        territory: TerritoryId,
        amount: f64,
        morale: f64,
    },
    AutonomyGranted { territory: TerritoryId },
    IndependenceGranted {
        territory: TerritoryId,
        name: String,
    },

    // Rebellions
    RebellionStarted {
        rebellion: RebellionId,
        territory: TerritoryId,
        strength: u32,
    },
    RebellionSuppressed {
        rebellion: RebellionId,
        territory: TerritoryId,
        casualties: u32,
    },
    SuppressionFailed {
        rebellion: RebellionId,
        territory: TerritoryId,
        casualties: u32,
    },
    RebellionCollapsed {
        rebellion: RebellionId,
        territory: TerritoryId,
    },
}

impl ConflictEvent {
    pub fn war(&self) -> Option<WarId> {
        match self {
            ConflictEvent::WarDeclared { war, .. }
            | ConflictEvent::StrategyChanged { war, .. }
            | ConflictEvent::StrategyTransitionCompleted { war, .. }
            | ConflictEvent::ExhaustionThresholdCrossed { war, .. }
            | ConflictEvent::WarConcluded { war, .. }
            | ConflictEvent::PeaceProposed { war, .. }
            | ConflictEvent::PeaceRejected { war, .. } => Some(*war),
            _ => None,
        }
    }

    pub fn territory(&self) -> Option<TerritoryId> {
        match self {
            ConflictEvent::TerritoryAnnexed { territory, .. }
            | ConflictEvent::TerritoryInvestment { territory, .. }
            | ConflictEvent::AutonomyGranted { territory }
            | ConflictEvent::IndependenceGranted { territory, .. }
            | ConflictEvent::RebellionStarted { territory, .. }
            | ConflictEvent::RebellionSuppressed { territory, .. }
            | ConflictEvent::SuppressionFailed { territory, .. }
            | ConflictEvent::RebellionCollapsed { territory, .. } => Some(*territory),
            _ => None,
        }
    }
}

/// The campaign event log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event_type: ConflictEvent, date: GameDate) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(Event { id, date, event_type });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_on(&self, date: GameDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.date == date)
    }

    pub fn events_for_war(&self, war: WarId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.event_type.war() == Some(war))
    }

    pub fn events_for_territory(&self, territory: TerritoryId) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.event_type.territory() == Some(territory))
    }

    /// Events logged after the one with `id`
    pub fn since(&self, id: u32) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.id > id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut log = EventLog::new();
        let rejected = ConflictEvent::PeaceRejected {
            war: WarId(1),
            term: PeaceTerm::FullConquest,
        };
        let a = log.add_event(rejected, GameDate(3));
        let b = log.add_event(
            ConflictEvent::AutonomyGranted {
                territory: TerritoryId(2),
            },
            GameDate(4),
        );
        assert_eq!((a, b), (0, 1));
        assert_eq!(log.since(a).count(), 1);
    }

    #[test]
    fn test_filters() {
        let mut log = EventLog::new();
        for war in [WarId(1), WarId(2)] {
            let term = PeaceTerm::StatusQuo;
            log.add_event(ConflictEvent::PeaceRejected { war, term }, GameDate(3));
        }
        log.add_event(ConflictEvent::AutonomyGranted { territory: TerritoryId(1) }, GameDate(5));

        assert_eq!(log.events_for_war(WarId(1)).count(), 1);
        assert_eq!(log.events_on(GameDate(3)).count(), 2);
        assert_eq!(log.events_for_territory(TerritoryId(1)).count(), 1);
    }
}
