//! War layer
//!
//! Strategy, attrition and exhaustion models, the lifecycle engine that owns
//! active wars, and the peace negotiation rules that end them.

pub mod attrition;
pub mod engine;
pub mod peace;
pub mod state;
pub mod strategy;

pub use attrition::{compute_attrition, compute_exhaustion, ExhaustionTier};
pub use engine::{PeaceSettlement, SettlementKind, TickReport, WarEngine};
pub use peace::{likelihood, resolve, surrender_term, NegotiationResult, PeaceResponse, PeaceTerm};
pub use state::{War, WarJustification, WarOutcome, WarType};
pub use strategy::{StrategyState, WarStrategy};
