//! Движок рулетки: ставки, расчёт выплат, жизненный цикл раунда, история.
//!
//! Высокоуровневый объект: `RouletteTable`
//! Основные операции:
//!   - `toggle_selection` – клик по позиции стола (поставить / снять)
//!   - `request_spin` – запустить колесо
//!   - `on_time_passed` / `advance` – довести раунд до расчёта

use std::time::Duration;

use crate::domain::Pocket;

pub mod errors;
pub mod history;
pub mod ledger;
pub mod payout;
pub mod round;

pub use errors::EngineError;
pub use history::{HistoryEntry, HistoryLog, OutcomeKind, ResolutionEvent};
pub use ledger::{Bet, BetChange, BetLedger};
pub use payout::{resolve, BetResult, Resolution};
pub use round::{PhaseTimer, RouletteTable, RoundState};

/// Источник исхода спина. Реализации лежат в infra.
pub trait SpinSource {
    /// Равномерно случайный карман 0..=36.
    fn spin(&mut self) -> Pocket;
}

/// Пауза между фазами раунда (саспенс для UI).
/// В тестах подставляется реализация без ожидания.
pub trait Pacer {
    fn pause(&mut self, state: RoundState, duration: Duration);
}
