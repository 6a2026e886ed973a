//! Campaign calendar
//!
//! The simulation advances in whole days. Weekly effects (exhaustion
//! penalties) and yearly effects (reparation payments) are derived from
//! the day index.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_YEAR: u32 = 365;

/// A day in the campaign, counted from day 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameDate(pub u32);

impl GameDate {
    pub const START: GameDate = GameDate(0);

    pub fn day(&self) -> u32 {
        self.0
    }

    pub fn add_days(&self, days: u32) -> GameDate {
        GameDate(self.0.saturating_add(days))
    }

    pub fn next(&self) -> GameDate {
        self.add_days(1)
    }

    /// Days elapsed since `earlier` (zero if `earlier` is in the future)
    pub fn days_since(&self, earlier: GameDate) -> u32 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn week(&self) -> u32 {
        self.0 / DAYS_PER_WEEK
    }

    pub fn year(&self) -> u32 {
        self.0 / DAYS_PER_YEAR
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{} D{}", self.year() + 1, self.0 % DAYS_PER_YEAR + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_since() {
        let start = GameDate(10);
        assert_eq!(GameDate(17).days_since(start), 7);
        assert_eq!(GameDate(5).days_since(start), 0);
    }

    #[test]
    fn test_week_and_year() {
        assert_eq!(GameDate(6).week(), 0);
        assert_eq!(GameDate(7).week(), 1);
        assert_eq!(GameDate(364).year(), 0);
        assert_eq!(GameDate(365).year(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(GameDate(0).to_string(), "Y1 D1");
        assert_eq!(GameDate(366).to_string(), "Y2 D2");
    }
}
