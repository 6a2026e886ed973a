//! Multi-year reparation schedules

use serde::{Deserialize, Serialize};

use crate::core::calendar::{GameDate, DAYS_PER_YEAR};
use crate::core::types::{AgreementId, CountryCode, WarId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReparationAgreement {
    pub id: AgreementId,
    pub payer: CountryCode,
    pub recipient: CountryCode,
    pub total_amount: f64,
    pub yearly_payment: f64,
    pub years_paid: u32,
    pub total_years: u32,
    pub war: WarId,
    pub started_on: GameDate,
}

impl ReparationAgreement {
    pub fn new(
        id: AgreementId,
        payer: CountryCode,
        recipient: CountryCode,
        total_amount: f64,
        total_years: u32,
        war: WarId,
        started_on: GameDate,
    ) -> Self {
        let total_years = total_years.max(1);
        Self {
            id,
            payer,
            recipient,
            total_amount,
            yearly_payment: total_amount / total_years as f64,
            years_paid: 0,
            total_years,
            war,
            started_on,
        }
    }

    /// Installments that have fallen due by `date` but are not yet paid.
    /// The first one is due on the first anniversary.
    pub fn payments_due(&self, date: GameDate) -> u32 {
        let years_elapsed = date.days_since(self.started_on) / DAYS_PER_YEAR;
        let anniversaries = years_elapsed.min(self.total_years);
        anniversaries.saturating_sub(self.years_paid)
    }

    pub fn is_complete(&self) -> bool {
        self.years_paid >= self.total_years
    }

    pub fn remaining(&self) -> f64 {
        self.yearly_payment * (self.total_years - self.years_paid.min(self.total_years)) as f64
    }
}

/// One installment paid during processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReparationPayment {
    pub agreement: AgreementId,
    pub payer: CountryCode,
    pub recipient: CountryCode,
    pub amount: f64,
}
