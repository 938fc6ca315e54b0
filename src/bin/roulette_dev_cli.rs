// src/bin/roulette_dev_cli.rs

use roulette_engine::api::{execute_command, get_state, selection_from_label, Command, TableStateDto};
use roulette_engine::domain::Chips;
use roulette_engine::engine::{OutcomeKind, RouletteTable};
use roulette_engine::infra::{init_tracing, ConfigLoader, SystemRng, TableConfig, ThreadSleepPacer};

/// Набор ставок для каждого раунда симуляции (надписи как на столе).
const SCRIPT: &[&[&str]] = &[
    &["7", "RED"],
    &["1st 12", "ODD", "2 to 1 (2nd)"],
    &["0", "19-36"],
    &["BLACK", "EVEN", "3rd 12"],
    &["17", "2 to 1 (1st)"],
];

fn main() {
    init_tracing();

    // 1. Конфиг: ROULETTE_CONFIG=path.toml + переменные ROULETTE_*
    let loader = match std::env::var("ROULETTE_CONFIG") {
        Ok(path) => ConfigLoader::new().with_path(path),
        Err(_) => ConfigLoader::new(),
    };
    let config = loader.load().unwrap_or_else(|err| {
        eprintln!("Конфиг не загружен ({err}), берём упрощённый стол");
        TableConfig::simple()
    });

    println!("roulette_dev_cli: стартовый баланс ₹{}", config.starting_bankroll);

    let mut table = RouletteTable::new(config, SystemRng);
    let mut pacer = ThreadSleepPacer;

    for (round, labels) in SCRIPT.iter().enumerate() {
        println!();
        println!("================ РАУНД {} =================", round + 1);

        for label in labels.iter() {
            let selection = match selection_from_label(label) {
                Ok(s) => s,
                Err(err) => {
                    println!("  пропускаем {label}: {err:?}");
                    continue;
                }
            };
            let resp = execute_command(
                &mut table,
                Command::ToggleSelection {
                    selection,
                    token: None,
                },
            );
            if !resp.applied {
                println!("  ставка {label} не принята: {:?}", resp.error);
            }
        }

        print_state(&get_state(&table));

        if table.ledger().is_empty() {
            println!("Ставок нет — заканчиваем.");
            break;
        }

        match table.run_round(&mut pacer) {
            Ok(event) => {
                println!("Выпало: {} ({:?})", event.outcome, event.outcome.color());
                match event.outcome_kind {
                    OutcomeKind::Win => {
                        println!("ВЫИГРЫШ ₹{}: {}", event.total_winnings, event.winning_labels().join(", "))
                    }
                    OutcomeKind::Loss => println!("Проигрыш ₹{}", event.loss_amount()),
                }
            }
            Err(err) => println!("Раунд не сыгран: {err}"),
        }

        // Следующий раунд фишкой покрупнее, если баланс позволяет.
        if table.bankroll() >= Chips(2_000) {
            let _ = table.select_token(Chips(200));
        } else {
            let _ = table.select_token(Chips(50));
        }
    }

    println!();
    println!("================ ИСТОРИЯ =================");
    let state = get_state(&table);
    for item in &state.history {
        println!(
            "#{:<3} {} spin={:>2} bet=₹{:<5} win=₹{:<5} {:?}",
            item.round_id,
            item.timestamp.format("%H:%M:%S"),
            item.spin.number(),
            item.total_bet.0,
            item.winnings.0,
            item.outcome
        );
    }
    println!("Итоговый баланс: ₹{}", state.bankroll);

    // Команда вне фазы ставок просто отклоняется.
    let resp = execute_command(&mut table, Command::Advance);
    println!("Advance без раунда: applied={} error={:?}", resp.applied, resp.error);
}

fn print_state(state: &TableStateDto) {
    println!(
        "Баланс ₹{} | фишка ₹{} | на столе ₹{}",
        state.bankroll, state.current_token, state.total_staked
    );
    for bet in &state.bets {
        println!("  {:<14} ₹{}", bet.label, bet.amount);
    }
}
