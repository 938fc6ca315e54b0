use crate::domain::Chips;
use crate::engine::round::RoundState;

use thiserror::Error;

/// Ошибки движка рулетки. Все восстановимые: раунд при них не ломается.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недостаточно средств: нужно {needed}, на балансе {available}")]
    InsufficientFunds { needed: Chips, available: Chips },

    #[error("Ставки закрыты, раунд в состоянии {0:?}")]
    BettingLocked(RoundState),

    #[error("Нельзя крутить колесо без ставок")]
    EmptyLedger,

    #[error("Возможный выигрыш не помещается в баланс: ставки {staked}, баланс {balance}")]
    PayoutOverflow { staked: Chips, balance: Chips },

    #[error("Номинал фишки {0} не поддерживается столом")]
    InvalidToken(Chips),

    #[error("Нет отложенной фазы раунда")]
    NothingPending,
}
