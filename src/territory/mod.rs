//! Territory control after a war: annexed land, rebellions, reparations

pub mod manager;
pub mod rebellion;
pub mod reparation;
pub mod territory;

pub use manager::TerritoryManager;
pub use rebellion::{suppression_probability, Rebellion, SuppressionOutcome};
pub use reparation::{ReparationAgreement, ReparationPayment};
pub use territory::{Territory, TerritoryKind};
