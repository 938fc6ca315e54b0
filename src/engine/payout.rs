//! Расчёт выплат по ставкам раунда.
//!
//! Все коэффициенты — "total return": ставка уже списана с баланса при
//! размещении, поэтому выигрыш включает и саму ставку (35:1 → ×36).

use serde::{Deserialize, Serialize};

use crate::domain::{BetColor, BetKind, BetSelection, Chips, Parity, Pocket, PocketColor};
use crate::engine::ledger::BetLedger;

/// Коэффициенты полного возврата.
pub mod multipliers {
    pub const STRAIGHT: u64 = 36;
    pub const COLUMN: u64 = 3;
    pub const DOZEN: u64 = 3;
    pub const EVEN_MONEY: u64 = 2;
}

/// Результат одной выигравшей ставки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetResult {
    pub selection: BetSelection,
    pub amount: Chips,
    pub win_amount: Chips,
}

/// Итог расчёта раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    pub total_winnings: Chips,
    /// Только выигравшие ставки, в порядке леджера.
    pub per_bet: Vec<BetResult>,
}

impl Resolution {
    pub fn is_win(&self) -> bool {
        !self.total_winnings.is_zero()
    }
}

/// Выиграла ли ставка при данном исходе.
pub fn wins(selection: &BetSelection, outcome: Pocket) -> bool {
    match *selection {
        BetSelection::Straight(p) => p == outcome,
        BetSelection::Column(c) => outcome.column() == Some(c),
        BetSelection::Dozen(d) => outcome.dozen() == Some(d),
        BetSelection::Range(h) => outcome.half() == Some(h),
        BetSelection::Parity(Parity::Even) => !outcome.is_zero() && outcome.number() % 2 == 0,
        BetSelection::Parity(Parity::Odd) => outcome.number() % 2 == 1,
        BetSelection::Color(BetColor::Red) => outcome.color() == PocketColor::Red,
        BetSelection::Color(BetColor::Black) => outcome.color() == PocketColor::Black,
    }
}

/// Коэффициент выплаты для вида ставки.
pub fn kind_multiplier(kind: BetKind) -> u64 {
    match kind {
        BetKind::Straight => multipliers::STRAIGHT,
        BetKind::Column => multipliers::COLUMN,
        BetKind::Dozen => multipliers::DOZEN,
        BetKind::Range | BetKind::Parity | BetKind::Color => multipliers::EVEN_MONEY,
    }
}

/// Коэффициент для конкретной ставки и исхода, 0 при проигрыше.
/// Зависит только от самой ставки и исхода.
pub fn multiplier(selection: &BetSelection, outcome: Pocket) -> u64 {
    if wins(selection, outcome) {
        kind_multiplier(selection.kind())
    } else {
        0
    }
}

/// Рассчитать все ставки леджера против исхода. Чистая функция.
pub fn resolve(ledger: &BetLedger, outcome: Pocket) -> Resolution {
    let per_bet: Vec<BetResult> = ledger
        .bets()
        .iter()
        .filter_map(|bet| {
            let m = multiplier(&bet.selection, outcome);
            (m > 0).then(|| BetResult {
                selection: bet.selection,
                amount: bet.amount,
                win_amount: bet.amount.times(m),
            })
        })
        .collect();

    let total_winnings = per_bet.iter().map(|r| r.win_amount).sum();

    Resolution {
        total_winnings,
        per_bet,
    }
}

/// Худший для казино случай: сумма выплат, если бы выиграли все ставки сразу.
/// `None`, если не помещается в u64.
pub fn max_payout(ledger: &BetLedger) -> Option<Chips> {
    ledger.bets().iter().try_fold(Chips::ZERO, |acc, bet| {
        let win = bet.amount.checked_times(kind_multiplier(bet.selection.kind()))?;
        acc.checked_add(win)
    })
}

/// Таблица выплат для отображения.
pub fn paytable() -> Vec<(BetKind, u64)> {
    [
        BetKind::Straight,
        BetKind::Column,
        BetKind::Dozen,
        BetKind::Range,
        BetKind::Parity,
        BetKind::Color,
    ]
    .into_iter()
    .map(|k| (k, kind_multiplier(k)))
    .collect()
}

/// Карманы, на которых ставка выигрывает.
pub fn covered_pockets(selection: &BetSelection) -> Vec<Pocket> {
    Pocket::all().filter(|p| wins(selection, *p)).collect()
}
