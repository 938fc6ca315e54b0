use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BetSelection, Chips, Pocket, PocketColor, RoundId};
use crate::engine::{HistoryEntry, OutcomeKind, ResolutionEvent, RoundState};

use super::errors::ApiError;

/// DTO одной ставки на столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetDto {
    pub selection: BetSelection,
    /// Надпись позиции на столе ("RED", "1st 12", "17").
    pub label: String,
    pub amount: Chips,
}

impl BetDto {
    pub fn new(selection: BetSelection, amount: Chips) -> Self {
        Self {
            selection,
            label: selection.to_string(),
            amount,
        }
    }
}

/// DTO одного раунда в истории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItemDto {
    pub round_id: RoundId,
    pub timestamp: DateTime<Utc>,
    pub spin: Pocket,
    pub spin_color: PocketColor,
    pub total_bet: Chips,
    pub winnings: Chips,
    pub outcome: OutcomeKind,
    pub bets: Vec<BetDto>,
}

impl From<&HistoryEntry> for HistoryItemDto {
    fn from(e: &HistoryEntry) -> Self {
        Self {
            round_id: e.round_id,
            timestamp: e.timestamp,
            spin: e.outcome,
            spin_color: e.outcome.color(),
            total_bet: e.total_staked,
            winnings: e.total_winnings,
            outcome: e.outcome_kind,
            bets: e.bets.iter().map(|(s, a)| BetDto::new(*s, *a)).collect(),
        }
    }
}

/// Полное состояние стола для фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStateDto {
    pub round_state: RoundState,
    pub bets: Vec<BetDto>,
    pub total_staked: Chips,
    pub bankroll: Chips,
    pub current_token: Chips,
    pub token_values: Vec<Chips>,
    /// Выпавший номер; `None`, пока колесо крутится.
    pub last_outcome: Option<Pocket>,
    /// История, самый свежий раунд первым.
    pub history: Vec<HistoryItemDto>,
    pub last_resolution: Option<ResolutionEvent>,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResponse {
    /// Применилась ли команда.
    pub applied: bool,
    /// Почему отказано (если `applied == false`).
    pub error: Option<ApiError>,
    /// Событие расчёта, если команда довела раунд до конца.
    pub resolution: Option<ResolutionEvent>,
    pub state: TableStateDto,
}
