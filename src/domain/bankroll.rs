use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Баланс игрока. Меняется только через `debit` / `credit`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bankroll {
    balance: Chips,
}

impl Bankroll {
    pub fn new(balance: Chips) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Chips {
        self.balance
    }

    pub fn can_afford(&self, amount: Chips) -> bool {
        amount <= self.balance
    }

    /// Списать сумму. Уйти в минус нельзя: при нехватке баланс не меняется.
    pub fn debit(&mut self, amount: Chips) -> Result<(), EngineError> {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                Ok(())
            }
            None => Err(EngineError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            }),
        }
    }

    /// Зачислить сумму. Верхней границы нет.
    pub fn credit(&mut self, amount: Chips) {
        self.balance += amount;
    }
}
