//! Read-only country snapshots
//!
//! Peace settlements and reparations need a loser's GDP and base territory.
//! The owning game state hands the core a snapshot; the core never mutates
//! it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CountryCode, MilitaryStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub code: CountryCode,
    pub name: String,
    /// Annual GDP in currency units
    pub gdp: f64,
    /// Base (pre-war) land area in square kilometres
    pub base_territory: f64,
    pub population: u64,
    pub military: MilitaryStatus,
}

impl CountryProfile {
    pub fn new(code: impl Into<CountryCode>, name: &str, gdp: f64, base_territory: f64) -> Self {
        Self {
            code: code.into(),
            name: name.to_string(),
            gdp,
            base_territory,
            population: 0,
            military: MilitaryStatus::Unavailable,
        }
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_military(mut self, strength: u64) -> Self {
        self.military = MilitaryStatus::Strength(strength);
        self
    }
}

/// Snapshot of every known country, keyed by code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryRegistry {
    countries: AHashMap<CountryCode, CountryProfile>,
}

impl CountryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: CountryProfile) {
        self.countries.insert(profile.code.clone(), profile);
    }

    /// Drop a country that no longer exists as a state
    pub fn remove(&mut self, code: &CountryCode) -> Option<CountryProfile> {
        self.countries.remove(code)
    }

    pub fn get(&self, code: &CountryCode) -> Option<&CountryProfile> {
        self.countries.get(code)
    }

    pub fn gdp(&self, code: &CountryCode) -> Option<f64> {
        self.get(code).map(|c| c.gdp)
    }

    pub fn base_territory(&self, code: &CountryCode) -> Option<f64> {
        self.get(code).map(|c| c.base_territory)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl FromIterator<CountryProfile> for CountryRegistry {
    fn from_iter<I: IntoIterator<Item = CountryProfile>>(iter: I) -> Self {
        let mut registry = CountryRegistry::new();
        for profile in iter {
            registry.insert(profile);
        }
        registry
    }
}
