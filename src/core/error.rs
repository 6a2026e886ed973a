use thiserror::Error;

use crate::core::types::{CountryCode, RebellionId, TerritoryId, WarId};
use crate::war::strategy::WarStrategy;

#[derive(Error, Debug)]
pub enum ConflictError {
    #[error("A country cannot declare war on itself: {0}")]
    SameCountry(CountryCode),

    #[error("{country} already has {active} active wars (limit {limit})")]
    TooManyActiveWars {
        country: CountryCode,
        active: usize,
        limit: usize,
    },

    #[error("Military strength {strength} is below the required {required}")]
    InsufficientStrength { strength: u64, required: u64 },

    #[error("Insufficient funds: need {needed:.0}, have {available:.0}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Treasury balance {balance:.0} is below the required {required:.0}")]
    TreasuryBelowMinimum { balance: f64, required: f64 },

    #[error("No military available")]
    NoMilitary,

    #[error("Strategy {0:?} is already active or in transition")]
    StrategyUnchanged(WarStrategy),

    #[error("War not found: {0}")]
    WarNotFound(WarId),

    #[error("War {0} has already been concluded")]
    AlreadyConcluded(WarId),

    #[error("War {0} has not been concluded")]
    NotConcluded(WarId),

    #[error("{country} is not a belligerent in {war}")]
    NotBelligerent { war: WarId, country: CountryCode },

    #[error("Unknown country: {0}")]
    UnknownCountry(CountryCode),

    #[error("Territory not found: {0}")]
    TerritoryNotFound(TerritoryId),

    #[error("Rebellion not found: {0}")]
    RebellionNotFound(RebellionId),

    #[error("Territory {0} is already autonomous")]
    AlreadyAutonomous(TerritoryId),

    #[error("Territory {0} already has an active rebellion")]
    RebellionActive(TerritoryId),

    #[error("Territory {territory} rebellion risk {risk:.2} is below the threshold {threshold:.2}")]
    RiskBelowThreshold {
        territory: TerritoryId,
        risk: f64,
        threshold: f64,
    },

    #[error("Territory {0} morale is already at maximum")]
    MoraleAtMaximum(TerritoryId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConflictError>;
