// tests/lifecycle_tests.rs
//
// Жизненный цикл раунда:
//  1) сценарии 1, 2, 4 (выигрыш номера, проигрыш, спин без ставок);
//  2) блокировка ставок в Spinning / Revealing;
//  3) таймеры фаз (on_time_passed) и схлопывание Revealing при нулевой паузе;
//  4) история (ограничение 10, голова = последний раунд);
//  5) очистка ставок после расчёта, брошенный раунд.

use std::time::Duration;

use roulette_engine::domain::{BetColor, BetSelection, Chips, Dozen, Parity, Pocket};
use roulette_engine::engine::{EngineError, OutcomeKind, RouletteTable, RoundState};
use roulette_engine::infra::{
    run_round_async, DeterministicRng, FixedOutcome, NoPacing, RecordingPacer, ScriptedOutcomes,
    TableConfig,
};

// -----------------------------
// helpers
// -----------------------------

fn pocket(n: u8) -> Pocket {
    Pocket::new(n).expect("номер на колесе")
}

fn straight(n: u8) -> BetSelection {
    BetSelection::Straight(pocket(n))
}

fn quick_table(outcome: u8) -> RouletteTable<FixedOutcome> {
    RouletteTable::new(TableConfig::quick(), FixedOutcome(pocket(outcome)))
}

fn paced_table(outcome: u8) -> RouletteTable<FixedOutcome> {
    RouletteTable::new(TableConfig::default(), FixedOutcome(pocket(outcome)))
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// -----------------------------
// Сценарии
// -----------------------------

#[test]
fn scenario_straight_hit() {
    let mut table = quick_table(7);
    assert_eq!(table.bankroll(), Chips(5_000));

    table.toggle_selection(straight(7), Some(Chips(100))).unwrap();
    assert_eq!(table.bankroll(), Chips(4_900));

    let event = table.run_round(&mut NoPacing).unwrap();

    assert_eq!(event.outcome, pocket(7));
    assert_eq!(event.total_winnings, Chips(3_600));
    assert_eq!(event.outcome_kind, OutcomeKind::Win);
    assert_eq!(table.bankroll(), Chips(8_500));

    let head = table.history().latest().expect("история не пуста");
    assert_eq!(head.outcome, pocket(7));
    assert_eq!(head.total_staked, Chips(100));
    assert_eq!(head.total_winnings, Chips(3_600));
    assert_eq!(head.outcome_kind, OutcomeKind::Win);
    assert_eq!(head.bets, vec![(straight(7), Chips(100))]);
}

#[test]
fn scenario_losing_round() {
    let mut table = quick_table(10);

    table
        .toggle_selection(BetSelection::Color(BetColor::Red), Some(Chips(200)))
        .unwrap();
    table
        .toggle_selection(BetSelection::Parity(Parity::Odd), Some(Chips(200)))
        .unwrap();
    assert_eq!(table.bankroll(), Chips(4_600));

    let event = table.run_round(&mut NoPacing).unwrap();

    assert_eq!(event.total_winnings, Chips::ZERO);
    assert_eq!(event.outcome_kind, OutcomeKind::Loss);
    assert_eq!(event.loss_amount(), Chips(400));
    assert_eq!(table.bankroll(), Chips(4_600));
    assert_eq!(
        table.history().latest().map(|e| e.outcome_kind),
        Some(OutcomeKind::Loss)
    );
}

#[test]
fn scenario_spin_without_bets_is_rejected() {
    let mut table = quick_table(0);

    assert_eq!(table.request_spin(), Err(EngineError::EmptyLedger));
    assert_eq!(table.state(), RoundState::AcceptingBets);
    assert!(table.timer().is_none());
    assert!(table.history().is_empty());
}

#[test]
fn scenario_token_above_bankroll() {
    let mut table = RouletteTable::new(
        TableConfig::quick().with_bankroll(Chips(50)),
        FixedOutcome(pocket(1)),
    );

    let err = table.toggle_selection(straight(1), Some(Chips(100))).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert!(table.ledger().is_empty());
    assert_eq!(table.bankroll(), Chips(50));
}

// -----------------------------
// Блокировка ставок
// -----------------------------

#[test]
fn betting_locked_while_spinning_and_revealing() {
    let mut table = paced_table(3);
    table.toggle_selection(straight(3), None).unwrap();
    table.request_spin().unwrap();
    assert_eq!(table.state(), RoundState::Spinning);

    let before = (table.ledger().clone(), table.bankroll());

    assert_eq!(
        table.toggle_selection(straight(4), None),
        Err(EngineError::BettingLocked(RoundState::Spinning))
    );
    assert_eq!(
        table.place_bet(straight(3), None),
        Err(EngineError::BettingLocked(RoundState::Spinning))
    );
    assert_eq!(
        table.remove_bet(&straight(3)),
        Err(EngineError::BettingLocked(RoundState::Spinning))
    );
    assert_eq!(
        table.request_spin(),
        Err(EngineError::BettingLocked(RoundState::Spinning))
    );

    table.on_time_passed(ms(3_000));
    assert_eq!(table.state(), RoundState::Revealing);
    assert_eq!(
        table.toggle_selection(straight(4), None),
        Err(EngineError::BettingLocked(RoundState::Revealing))
    );

    assert_eq!((table.ledger().clone(), table.bankroll()), before);
}

// -----------------------------
// Таймеры фаз
// -----------------------------

#[test]
fn phases_follow_configured_delays() {
    let mut table = paced_table(17);
    table.toggle_selection(straight(17), Some(Chips(100))).unwrap();
    table.request_spin().unwrap();

    // Ещё крутится: номера нет.
    assert!(table.on_time_passed(ms(2_999)).is_none());
    assert_eq!(table.state(), RoundState::Spinning);
    assert_eq!(table.last_outcome(), None);

    // Номер выпал, но выплаты ещё нет.
    assert!(table.on_time_passed(ms(1)).is_none());
    assert_eq!(table.state(), RoundState::Revealing);
    assert_eq!(table.last_outcome(), Some(pocket(17)));
    assert_eq!(table.bankroll(), Chips(4_900));
    assert_eq!(table.ledger().len(), 1);

    assert!(table.on_time_passed(ms(1_000)).is_none());
    let event = table.on_time_passed(ms(500)).expect("раунд рассчитан");

    assert_eq!(event.total_winnings, Chips(3_600));
    assert_eq!(table.state(), RoundState::AcceptingBets);
    assert_eq!(table.bankroll(), Chips(8_500));
    assert!(table.timer().is_none());
}

#[test]
fn one_long_tick_runs_both_phases() {
    let mut table = paced_table(2);
    table.toggle_selection(straight(2), None).unwrap();
    table.request_spin().unwrap();

    let event = table.on_time_passed(ms(60_000)).expect("раунд рассчитан");
    assert_eq!(event.outcome, pocket(2));
    assert_eq!(table.state(), RoundState::AcceptingBets);
}

#[test]
fn simple_variant_skips_reveal() {
    let mut table = RouletteTable::new(TableConfig::simple(), FixedOutcome(pocket(9)));
    table.toggle_selection(straight(9), None).unwrap();
    table.request_spin().unwrap();

    let event = table.on_time_passed(ms(500)).expect("раунд рассчитан сразу после спина");
    assert_eq!(event.outcome, pocket(9));
    assert_eq!(table.state(), RoundState::AcceptingBets);
}

#[test]
fn advance_completes_one_phase_at_a_time() {
    let mut table = paced_table(11);
    table.toggle_selection(straight(11), None).unwrap();

    assert_eq!(table.advance(), Err(EngineError::NothingPending));

    table.request_spin().unwrap();
    assert_eq!(table.advance(), Ok(None));
    assert_eq!(table.state(), RoundState::Revealing);

    let event = table.advance().unwrap().expect("раунд рассчитан");
    assert_eq!(event.outcome, pocket(11));
    assert_eq!(table.advance(), Err(EngineError::NothingPending));
}

#[test]
fn run_round_pauses_in_phase_order() {
    let mut table = paced_table(30);
    table.toggle_selection(straight(30), None).unwrap();

    let mut pacer = RecordingPacer::default();
    table.run_round(&mut pacer).unwrap();

    assert_eq!(
        pacer.pauses,
        vec![
            (RoundState::Spinning, ms(3_000)),
            (RoundState::Revealing, ms(1_500)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn async_round_sleeps_through_phases() {
    let mut table = paced_table(7);
    table.toggle_selection(straight(7), Some(Chips(100))).unwrap();

    let started = tokio::time::Instant::now();
    let event = run_round_async(&mut table).await.unwrap();

    assert_eq!(event.total_winnings, Chips(3_600));
    assert!(started.elapsed() >= ms(4_500));
    assert_eq!(table.state(), RoundState::AcceptingBets);
}

// -----------------------------
// После расчёта
// -----------------------------

#[test]
fn ledger_is_empty_after_every_round() {
    let mut table = RouletteTable::new(TableConfig::quick(), DeterministicRng::from_seed(42));

    for round in 0..20u8 {
        table.toggle_selection(straight(round % 37), Some(Chips(20))).unwrap();
        table
            .toggle_selection(BetSelection::Dozen(Dozen::Second), Some(Chips(20)))
            .unwrap();
        table.run_round(&mut NoPacing).unwrap();

        assert!(table.ledger().is_empty());
        assert_eq!(table.ledger().total_staked(), Chips::ZERO);
        assert_eq!(table.state(), RoundState::AcceptingBets);
    }
}

#[test]
fn history_keeps_last_ten_newest_first() {
    let outcomes: Vec<Pocket> = (1..=15).map(pocket).collect();
    let mut table = RouletteTable::new(TableConfig::quick(), ScriptedOutcomes::new(outcomes));

    let mut last_round = 0;
    for _ in 0..15 {
        table.toggle_selection(straight(0), Some(Chips(20))).unwrap();
        last_round = table.run_round(&mut NoPacing).unwrap().round_id;
    }

    let history = table.history();
    assert_eq!(history.len(), 10);

    let spins: Vec<u8> = history.iter().map(|e| e.outcome.number()).collect();
    assert_eq!(spins, (6..=15).rev().collect::<Vec<u8>>());
    assert_eq!(history.latest().map(|e| e.round_id), Some(last_round));
}

#[test]
fn payout_is_credited_once_per_round() {
    let mut table = quick_table(0);
    table.toggle_selection(straight(0), Some(Chips(100))).unwrap();
    let event = table.run_round(&mut NoPacing).unwrap();
    assert_eq!(event.total_winnings, Chips(3_600));
    assert_eq!(table.bankroll(), Chips(8_500));

    // Повторный advance не должен снова платить.
    assert_eq!(table.advance(), Err(EngineError::NothingPending));
    assert_eq!(table.bankroll(), Chips(8_500));
    assert_eq!(table.history().len(), 1);
}

#[test]
fn spin_refused_when_winnings_would_not_fit_in_balance() {
    let stake = Chips(u64::MAX / 10);
    let mut table = RouletteTable::new(TableConfig::quick().with_bankroll(stake), FixedOutcome(pocket(7)));
    table.place_bet(straight(7), Some(stake)).unwrap();

    assert_eq!(
        table.request_spin(),
        Err(EngineError::PayoutOverflow {
            staked: stake,
            balance: Chips::ZERO
        })
    );
    assert_eq!(table.state(), RoundState::AcceptingBets);
    assert_eq!(table.ledger().total_staked(), stake);

    // Ставку можно снять, деньги целы.
    table.remove_bet(&straight(7)).unwrap();
    assert_eq!(table.bankroll(), stake);
}

#[test]
fn large_stake_that_fits_is_paid_in_full() {
    let stake = Chips(u64::MAX / 40);
    let mut table = RouletteTable::new(TableConfig::quick().with_bankroll(stake), FixedOutcome(pocket(7)));
    table.place_bet(straight(7), Some(stake)).unwrap();

    let event = table.run_round(&mut NoPacing).unwrap();
    assert_eq!(event.total_winnings, Chips(stake.0 * 36));
    assert_eq!(table.bankroll(), Chips(stake.0 * 36));
}

#[test]
fn discarded_round_pays_nothing_and_unlocks_table() {
    let mut table = paced_table(7);
    table.toggle_selection(straight(7), Some(Chips(100))).unwrap();
    table.request_spin().unwrap();
    table.on_time_passed(ms(3_000));
    assert_eq!(table.state(), RoundState::Revealing);

    assert!(table.discard_round());

    assert_eq!(table.state(), RoundState::AcceptingBets);
    assert!(table.ledger().is_empty());
    assert_eq!(table.bankroll(), Chips(4_900));
    assert!(table.history().is_empty());
    assert!(table.last_resolution().is_none());

    assert!(!table.discard_round());
}

#[test]
fn token_selector_accepts_only_table_denominations() {
    let mut table = quick_table(0);
    assert_eq!(table.current_token(), Chips(100));

    table.select_token(Chips(250)).unwrap();
    assert_eq!(table.current_token(), Chips(250));

    assert_eq!(table.select_token(Chips(30)), Err(EngineError::InvalidToken(Chips(30))));
    assert_eq!(table.current_token(), Chips(250));

    table.toggle_selection(straight(5), None).unwrap();
    assert_eq!(table.ledger().get(&straight(5)).map(|b| b.amount), Some(Chips(250)));
}
