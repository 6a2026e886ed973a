//! Treasury collaborator
//!
//! The conflict core never owns money. Every cost or payment goes through a
//! `Treasury`, which owns the balance and rejects overdrafts.

use serde::{Deserialize, Serialize};

use crate::core::error::{ConflictError, Result};

pub trait Treasury {
    fn balance(&self) -> f64;

    /// Withdraw `amount`. Fails without side effects when funds are short.
    fn debit(&mut self, amount: f64, description: &str) -> Result<()>;

    fn credit(&mut self, amount: f64, description: &str);

    fn can_afford(&self, amount: f64) -> bool {
        self.balance() >= amount
    }
}

/// A single treasury movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed amount: negative for debits
    pub amount: f64,
    pub description: String,
}

/// Simple in-memory treasury with a transaction journal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    balance: f64,
    journal: Vec<Transaction>,
}

impl Ledger {
    pub fn new(opening_balance: f64) -> Self {
        Self {
            balance: opening_balance,
            journal: Vec::new(),
        }
    }

    pub fn journal(&self) -> &[Transaction] {
        &self.journal
    }

    /// Sum of all debits recorded with the given description prefix
    pub fn spent_on(&self, prefix: &str) -> f64 {
        self.journal
            .iter()
            .filter(|t| t.amount < 0.0 && t.description.starts_with(prefix))
            .map(|t| -t.amount)
            .sum()
    }
}

impl Treasury for Ledger {
    fn balance(&self) -> f64 {
        self.balance
    }

    fn debit(&mut self, amount: f64, description: &str) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ConflictError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(ConflictError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.journal.push(Transaction {
            amount: -amount,
            description: description.to_string(),
        });
        Ok(())
    }

    fn credit(&mut self, amount: f64, description: &str) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.balance += amount;
        self.journal.push(Transaction {
            amount,
            description: description.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let mut ledger = Ledger::new(1_000.0);
        ledger.debit(400.0, "Suppression: north").unwrap();
        ledger.credit(50.0, "Reparations received");

        assert_eq!(ledger.balance(), 650.0);
        assert_eq!(ledger.journal().len(), 2);
        assert_eq!(ledger.spent_on("Suppression"), 400.0);
    }

    #[test]
    fn test_overdraft_rejected_without_change() {
        let mut ledger = Ledger::new(100.0);
        let result = ledger.debit(150.0, "Investment");

        assert!(matches!(result, Err(ConflictError::InsufficientFunds { .. })));
        assert_eq!(ledger.balance(), 100.0);
        assert!(ledger.journal().is_empty());
    }

    #[test]
    fn test_negative_debit_rejected() {
        let mut ledger = Ledger::new(100.0);
        assert!(ledger.debit(-5.0, "bogus").is_err());
        assert!(ledger.can_afford(100.0));
        assert!(!ledger.can_afford(100.5));
    }
}
