use serde::{Deserialize, Serialize};

use crate::domain::BetSelection;
use crate::engine::{payout, RouletteTable, SpinSource};

use super::dto::{BetDto, HistoryItemDto, TableStateDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Полное состояние стола.
    GetState,

    /// Таблица выплат.
    GetPaytable,

    /// Номера, на которых выигрывает позиция.
    CoveredPockets { selection: BetSelection },
}

/// Строка таблицы выплат.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaytableRowDto {
    pub kind: crate::domain::BetKind,
    pub multiplier: u64,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    State(TableStateDto),
    Paytable(Vec<PaytableRowDto>),
    Pockets(Vec<u8>),
}

pub fn run_query<R: SpinSource>(table: &RouletteTable<R>, query: &Query) -> QueryResponse {
    match query {
        Query::GetState => QueryResponse::State(get_state(table)),
        Query::GetPaytable => QueryResponse::Paytable(
            payout::paytable()
                .into_iter()
                .map(|(kind, multiplier)| PaytableRowDto { kind, multiplier })
                .collect(),
        ),
        Query::CoveredPockets { selection } => QueryResponse::Pockets(
            payout::covered_pockets(selection)
                .into_iter()
                .map(|p| p.number())
                .collect(),
        ),
    }
}

/// Снимок состояния стола: фаза, ставки, баланс, последний номер, история.
pub fn get_state<R: SpinSource>(table: &RouletteTable<R>) -> TableStateDto {
    let ledger = table.ledger();

    TableStateDto {
        round_state: table.state(),
        bets: ledger
            .bets()
            .iter()
            .map(|b| BetDto::new(b.selection, b.amount))
            .collect(),
        total_staked: ledger.total_staked(),
        bankroll: table.bankroll(),
        current_token: table.current_token(),
        token_values: table.config().token_values.clone(),
        last_outcome: table.last_outcome(),
        history: table.history().iter().map(HistoryItemDto::from).collect(),
        last_resolution: table.last_resolution().cloned(),
    }
}
