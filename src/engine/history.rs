use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BetSelection, Chips, Pocket, RoundId};
use crate::engine::payout::BetResult;

/// Сколько раундов хранит история по умолчанию.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
/// Верхняя граница размера истории из конфига.
pub const MAX_HISTORY_CAPACITY: usize = 1_000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutcomeKind {
    Win,
    Loss,
}

impl OutcomeKind {
    pub fn from_winnings(total_winnings: Chips) -> Self {
        if total_winnings.is_zero() {
            OutcomeKind::Loss
        } else {
            OutcomeKind::Win
        }
    }
}

/// Снимок рассчитанного раунда. После создания не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub round_id: RoundId,
    pub timestamp: DateTime<Utc>,
    pub outcome: Pocket,
    pub total_staked: Chips,
    pub total_winnings: Chips,
    pub outcome_kind: OutcomeKind,
    /// Ставки раунда в порядке размещения.
    pub bets: Vec<(BetSelection, Chips)>,
}

/// Событие расчёта, ровно одно на раунд.
///
/// Вызывающий код (UI, звук) решает, что с ним делать.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionEvent {
    pub round_id: RoundId,
    pub outcome: Pocket,
    pub total_staked: Chips,
    pub total_winnings: Chips,
    pub per_bet: Vec<BetResult>,
    pub outcome_kind: OutcomeKind,
}

impl ResolutionEvent {
    /// Сколько проиграно при проигрыше (вся ставка раунда), иначе 0.
    pub fn loss_amount(&self) -> Chips {
        match self.outcome_kind {
            OutcomeKind::Win => Chips::ZERO,
            OutcomeKind::Loss => self.total_staked,
        }
    }

    /// Строки вида "RED (₹400)" для окна выигрыша.
    pub fn winning_labels(&self) -> Vec<String> {
        self.per_bet
            .iter()
            .map(|r| format!("{} (₹{})", r.selection, r.win_amount))
            .collect()
    }
}

/// Последние N раундов, самый свежий первым.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryLog {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// Ёмкость меньше 1 поднимается до 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Добавить запись в голову; самая старая вытесняется с хвоста.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
