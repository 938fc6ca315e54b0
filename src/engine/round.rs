use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Bankroll, BetSelection, Chips, Pocket, RoundId};
use crate::engine::errors::EngineError;
use crate::engine::history::{HistoryEntry, HistoryLog, OutcomeKind, ResolutionEvent};
use crate::engine::ledger::{Bet, BetChange, BetLedger};
use crate::engine::payout;
use crate::engine::{Pacer, SpinSource};
use crate::infra::config::TableConfig;
use crate::infra::ids::IdGenerator;

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoundState {
    AcceptingBets,
    Spinning,
    Revealing,
    Resolved,
}

/// Таймер текущей фазы: сколько ещё ждать до перехода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseTimer {
    pub state: RoundState,
    pub remaining: Duration,
}

/// Стол рулетки: один игрок, одно колесо.
///
/// Жизненный цикл раунда:
///   AcceptingBets → (request_spin) → Spinning → (spin delay, выпадает номер)
///   → Revealing → (reveal delay) → Resolved → сразу AcceptingBets.
///
/// Время двигает вызывающий код: `on_time_passed` (тиками) или `advance`
/// (сразу завершить текущую фазу).
#[derive(Debug)]
pub struct RouletteTable<R: SpinSource> {
    config: TableConfig,
    rng: R,
    ids: IdGenerator,
    state: RoundState,
    bankroll: Bankroll,
    ledger: BetLedger,
    history: HistoryLog,
    current_token: Chips,
    timer: Option<PhaseTimer>,
    round_id: Option<RoundId>,
    /// Номер текущего раунда (фиксируется в конце Spinning).
    pending_outcome: Option<Pocket>,
    last_outcome: Option<Pocket>,
    last_resolution: Option<ResolutionEvent>,
}

impl<R: SpinSource> RouletteTable<R> {
    pub fn new(config: TableConfig, rng: R) -> Self {
        let bankroll = Bankroll::new(config.starting_bankroll);
        let history = HistoryLog::new(config.history_capacity);
        let current_token = config.default_token;

        Self {
            config,
            rng,
            ids: IdGenerator::new(),
            state: RoundState::AcceptingBets,
            bankroll,
            ledger: BetLedger::new(),
            history,
            current_token,
            timer: None,
            round_id: None,
            pending_outcome: None,
            last_outcome: None,
            last_resolution: None,
        }
    }

    // ---------- чтение ----------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn bankroll(&self) -> Chips {
        self.bankroll.balance()
    }

    pub fn ledger(&self) -> &BetLedger {
        &self.ledger
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn current_token(&self) -> Chips {
        self.current_token
    }

    pub fn timer(&self) -> Option<PhaseTimer> {
        self.timer
    }

    /// Id раунда, который сейчас крутится.
    pub fn round_id(&self) -> Option<RoundId> {
        self.round_id
    }

    /// Последний выпавший номер (виден уже в фазе Revealing).
    pub fn last_outcome(&self) -> Option<Pocket> {
        self.last_outcome
    }

    pub fn last_resolution(&self) -> Option<&ResolutionEvent> {
        self.last_resolution.as_ref()
    }

    pub fn is_accepting_bets(&self) -> bool {
        self.state == RoundState::AcceptingBets
    }

    // ---------- ставки ----------

    fn ensure_accepting(&self) -> Result<(), EngineError> {
        if self.is_accepting_bets() {
            Ok(())
        } else {
            Err(EngineError::BettingLocked(self.state))
        }
    }

    /// Выбрать номинал фишки из разрешённых столом.
    pub fn select_token(&mut self, token: Chips) -> Result<(), EngineError> {
        if !self.config.token_values.contains(&token) {
            return Err(EngineError::InvalidToken(token));
        }
        self.current_token = token;
        Ok(())
    }

    /// Единственная точка входа для клика по столу.
    /// При `token = None` берётся текущий номинал.
    pub fn toggle_selection(
        &mut self,
        selection: BetSelection,
        token: Option<Chips>,
    ) -> Result<BetChange, EngineError> {
        self.ensure_accepting()?;
        let token = token.unwrap_or(self.current_token);
        self.ledger.toggle(selection, token, &mut self.bankroll)
    }

    /// Добавить фишку на позицию (без правил взаимоисключения групп).
    pub fn place_bet(&mut self, selection: BetSelection, token: Option<Chips>) -> Result<Chips, EngineError> {
        self.ensure_accepting()?;
        let token = token.unwrap_or(self.current_token);
        self.ledger.place_bet(selection, token, &mut self.bankroll)
    }

    pub fn remove_bet(&mut self, selection: &BetSelection) -> Result<Option<Bet>, EngineError> {
        self.ensure_accepting()?;
        Ok(self.ledger.remove_bet(selection, &mut self.bankroll))
    }

    // ---------- раунд ----------

    /// Запустить колесо. Без ставок или вне AcceptingBets отказ.
    /// Отказ и тогда, когда баланс плюс максимально возможный выигрыш не помещается в `Chips`.
    pub fn request_spin(&mut self) -> Result<RoundId, EngineError> {
        self.ensure_accepting()?;
        if self.ledger.total_staked().is_zero() {
            return Err(EngineError::EmptyLedger);
        }
        let fits = payout::max_payout(&self.ledger)
            .and_then(|max| self.bankroll.balance().checked_add(max))
            .is_some();
        if !fits {
            return Err(EngineError::PayoutOverflow {
                staked: self.ledger.total_staked(),
                balance: self.bankroll.balance(),
            });
        }

        let round_id = self.ids.next_round_id();
        self.round_id = Some(round_id);
        self.pending_outcome = None;
        self.last_outcome = None;
        self.state = RoundState::Spinning;
        self.timer = Some(PhaseTimer {
            state: RoundState::Spinning,
            remaining: self.config.spin_delay(),
        });

        info!(
            round_id,
            staked = %self.ledger.total_staked(),
            bets = self.ledger.len(),
            "колесо запущено"
        );
        Ok(round_id)
    }

    /// Протекание времени. Может пройти сразу несколько фаз за один тик.
    /// Возвращает событие расчёта, если раунд завершился на этом тике.
    pub fn on_time_passed(&mut self, delta: Duration) -> Option<ResolutionEvent> {
        let mut left = delta;

        while let Some(timer) = self.timer.as_mut() {
            if left < timer.remaining {
                timer.remaining -= left;
                return None;
            }
            left -= timer.remaining;

            if let Some(event) = self.complete_phase() {
                return Some(event);
            }
        }

        None
    }

    /// Сразу завершить текущую фазу, не дожидаясь таймера.
    pub fn advance(&mut self) -> Result<Option<ResolutionEvent>, EngineError> {
        if self.timer.is_none() {
            return Err(EngineError::NothingPending);
        }
        Ok(self.complete_phase())
    }

    /// Сыграть раунд целиком, выдерживая паузы через `pacer`.
    pub fn run_round<P: Pacer>(&mut self, pacer: &mut P) -> Result<ResolutionEvent, EngineError> {
        self.request_spin()?;

        while let Some(timer) = self.timer {
            pacer.pause(timer.state, timer.remaining);
            if let Some(event) = self.complete_phase() {
                return Ok(event);
            }
        }

        Err(EngineError::NothingPending)
    }

    /// Бросить раунд посреди фаз: ставки сгорают, выплат и записи в историю нет.
    /// В AcceptingBets ничего не делает.
    pub fn discard_round(&mut self) -> bool {
        if self.is_accepting_bets() {
            return false;
        }

        warn!(round_id = ?self.round_id, state = ?self.state, "раунд брошен без расчёта");
        self.ledger.clear();
        self.timer = None;
        self.round_id = None;
        self.pending_outcome = None;
        self.state = RoundState::AcceptingBets;
        true
    }

    fn complete_phase(&mut self) -> Option<ResolutionEvent> {
        match self.state {
            RoundState::Spinning => {
                let outcome = self.rng.spin();
                self.pending_outcome = Some(outcome);
                self.last_outcome = Some(outcome);

                info!(round_id = ?self.round_id, %outcome, "выпал номер");

                let reveal = self.config.reveal_delay();
                if reveal.is_zero() {
                    return Some(self.resolve_round(outcome));
                }

                self.state = RoundState::Revealing;
                self.timer = Some(PhaseTimer {
                    state: RoundState::Revealing,
                    remaining: reveal,
                });
                None
            }
            RoundState::Revealing => {
                let outcome = self.pending_outcome?;
                Some(self.resolve_round(outcome))
            }
            RoundState::AcceptingBets | RoundState::Resolved => {
                self.timer = None;
                None
            }
        }
    }

    /// Расчёт: исход → выплата → баланс → история → очистка ставок.
    fn resolve_round(&mut self, outcome: Pocket) -> ResolutionEvent {
        self.state = RoundState::Resolved;
        self.timer = None;

        let round_id = self.round_id.unwrap_or_default();
        let total_staked = self.ledger.total_staked();
        let resolution = payout::resolve(&self.ledger, outcome);
        let outcome_kind = OutcomeKind::from_winnings(resolution.total_winnings);

        self.bankroll.credit(resolution.total_winnings);

        self.history.append(HistoryEntry {
            round_id,
            timestamp: Utc::now(),
            outcome,
            total_staked,
            total_winnings: resolution.total_winnings,
            outcome_kind,
            bets: self.ledger.snapshot(),
        });

        self.ledger.clear();

        let event = ResolutionEvent {
            round_id,
            outcome,
            total_staked,
            total_winnings: resolution.total_winnings,
            per_bet: resolution.per_bet,
            outcome_kind,
        };

        info!(
            round_id,
            %outcome,
            staked = %total_staked,
            winnings = %event.total_winnings,
            kind = ?outcome_kind,
            balance = %self.bankroll.balance(),
            "раунд рассчитан"
        );

        self.last_resolution = Some(event.clone());
        self.round_id = None;
        self.pending_outcome = None;
        self.state = RoundState::AcceptingBets;
        event
    }
}
