//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Country identifier (ISO-style code such as "USA")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryCode(pub String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// War identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WarId(pub u32);

/// Territory identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub u32);

/// Rebellion identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RebellionId(pub u32);

/// Reparation agreement identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgreementId(pub u32);

macro_rules! display_id {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )*
    };
}

display_id!(
    WarId => "war",
    TerritoryId => "territory",
    RebellionId => "rebellion",
    AgreementId => "agreement",
);

/// Military capacity of a country or character.
///
/// `Unavailable` means no military exists yet, which is a different
/// condition from an army that has been reduced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilitaryStatus {
    Unavailable,
    Strength(u64),
}

impl MilitaryStatus {
    pub fn strength(&self) -> Option<u64> {
        match self {
            MilitaryStatus::Unavailable => None,
            MilitaryStatus::Strength(s) => Some(*s),
        }
    }
}

/// Deltas signalled to the player's political standing.
///
/// The core never applies these itself; the owning collaborator clamps
/// them to its own valid ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoliticalImpact {
    pub approval: f64,
    pub reputation: f64,
    pub stress: f64,
}

impl PoliticalImpact {
    pub const NONE: PoliticalImpact = PoliticalImpact {
        approval: 0.0,
        reputation: 0.0,
        stress: 0.0,
    };

    pub fn new(approval: f64, reputation: f64, stress: f64) -> Self {
        Self {
            approval,
            reputation,
            stress,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.approval == 0.0 && self.reputation == 0.0 && self.stress == 0.0
    }
}

impl std::ops::Add for PoliticalImpact {
    type Output = PoliticalImpact;

    fn add(self, rhs: PoliticalImpact) -> PoliticalImpact {
        PoliticalImpact {
            approval: self.approval + rhs.approval,
            reputation: self.reputation + rhs.reputation,
            stress: self.stress + rhs.stress,
        }
    }
}

impl std::ops::AddAssign for PoliticalImpact {
    fn add_assign(&mut self, rhs: PoliticalImpact) {
        *self = *self + rhs;
    }
}
