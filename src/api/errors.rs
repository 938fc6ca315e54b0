use serde::{Deserialize, Serialize};

use crate::domain::{Chips, UnknownSelection};
use crate::engine::{EngineError, RoundState};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Метка ставки вне закрытого набора позиций стола.
    UnknownSelection(String),

    /// Не хватает баланса на фишку.
    InsufficientFunds { needed: Chips, available: Chips },

    /// Команда не может быть выполнена в текущей фазе раунда.
    InvalidLifecycleTransition { state: RoundState, reason: String },

    /// Прочие отказы движка.
    EngineError(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InsufficientFunds { needed, available } => {
                ApiError::InsufficientFunds { needed, available }
            }
            EngineError::BettingLocked(state) => {
                ApiError::InvalidLifecycleTransition {
                    state,
                    reason: err.to_string(),
                }
            }
            EngineError::EmptyLedger => ApiError::InvalidLifecycleTransition {
                state: RoundState::AcceptingBets,
                reason: err.to_string(),
            },
            other => ApiError::EngineError(other.to_string()),
        }
    }
}

impl From<UnknownSelection> for ApiError {
    fn from(err: UnknownSelection) -> Self {
        ApiError::UnknownSelection(err.0)
    }
}
