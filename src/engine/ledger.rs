use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Bankroll, BetSelection, Chips};
use crate::engine::errors::EngineError;

/// Одна ставка на столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    pub selection: BetSelection,
    /// Сумма всех фишек, поставленных на эту позицию. Всегда > 0.
    pub amount: Chips,
}

/// Что сделал `toggle`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BetChange {
    /// Ставка поставлена; `displaced`: снятые ставки той же группы (с возвратом).
    Placed {
        selection: BetSelection,
        amount: Chips,
        displaced: Vec<Bet>,
    },
    /// Ставка снята целиком, сумма возвращена на баланс.
    Removed(Bet),
}

/// Ставки текущего раунда.
///
/// Ключ: `BetSelection`. Порядок вставки сохраняется (для отображения
/// и для стабильного порядка результатов выплат).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetLedger {
    bets: Vec<Bet>,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, selection: &BetSelection) -> Option<&Bet> {
        self.bets.iter().find(|b| b.selection == *selection)
    }

    pub fn contains(&self, selection: &BetSelection) -> bool {
        self.get(selection).is_some()
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    pub fn total_staked(&self) -> Chips {
        self.bets.iter().map(|b| b.amount).sum()
    }

    /// Пары (ставка, сумма) в порядке вставки.
    pub fn snapshot(&self) -> Vec<(BetSelection, Chips)> {
        self.bets.iter().map(|b| (b.selection, b.amount)).collect()
    }

    /// Поставить фишку номиналом `token`. Повторная ставка на ту же позицию
    /// увеличивает сумму. При нехватке средств ничего не меняется.
    pub fn place_bet(
        &mut self,
        selection: BetSelection,
        token: Chips,
        bankroll: &mut Bankroll,
    ) -> Result<Chips, EngineError> {
        if token.is_zero() {
            return Err(EngineError::InvalidToken(token));
        }
        bankroll.debit(token)?;

        let amount = match self.bets.iter_mut().find(|b| b.selection == selection) {
            Some(bet) => {
                bet.amount += token;
                bet.amount
            }
            None => {
                self.bets.push(Bet {
                    selection,
                    amount: token,
                });
                token
            }
        };

        debug!(%selection, %token, %amount, balance = %bankroll.balance(), "ставка принята");
        Ok(amount)
    }

    /// Снять ставку целиком с полным возвратом. `None`, если ставки нет.
    pub fn remove_bet(&mut self, selection: &BetSelection, bankroll: &mut Bankroll) -> Option<Bet> {
        let idx = self.bets.iter().position(|b| b.selection == *selection)?;
        let bet = self.bets.remove(idx);
        bankroll.credit(bet.amount);

        debug!(selection = %bet.selection, refund = %bet.amount, "ставка снята");
        Some(bet)
    }

    /// Клик по позиции стола.
    ///
    /// - ставка уже есть → снимаем её целиком;
    /// - иначе снимаем чужую ставку из той же группы внешних ставок и ставим новую.
    ///
    /// Если на новую ставку не хватает денег, снятые ставки группы
    /// возвращаются на место: операция атомарна. Вызывающий видит `Err`,
    /// а соперник по группе остаётся на столе со своей суммой, хотя
    /// последовательное "снять, потом поставить" оставило бы его снятым.
    pub fn toggle(
        &mut self,
        selection: BetSelection,
        token: Chips,
        bankroll: &mut Bankroll,
    ) -> Result<BetChange, EngineError> {
        if self.contains(&selection) {
            return self
                .remove_bet(&selection, bankroll)
                .map(BetChange::Removed)
                .ok_or(EngineError::NothingPending);
        }

        let before = (self.clone(), *bankroll);

        let mut displaced = Vec::new();
        if let Some(group) = selection.group() {
            let rivals: Vec<BetSelection> = self
                .bets
                .iter()
                .map(|b| b.selection)
                .filter(|s| *s != selection && s.group() == Some(group))
                .collect();
            for rival in rivals {
                if let Some(bet) = self.remove_bet(&rival, bankroll) {
                    displaced.push(bet);
                }
            }
        }

        match self.place_bet(selection, token, bankroll) {
            Ok(amount) => Ok(BetChange::Placed {
                selection,
                amount,
                displaced,
            }),
            Err(err) => {
                (*self, *bankroll) = before;
                Err(err)
            }
        }
    }

    /// Очистить ставки без возврата (после расчёта раунда).
    pub fn clear(&mut self) {
        self.bets.clear();
    }
}
