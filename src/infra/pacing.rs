//! Паузы между фазами раунда.
//!
//! Движок сам не спит, ему подставляют `Pacer`: в CLI настоящий sleep,
//! в тестах `NoPacing` / `RecordingPacer`. Для tokio-хостов есть `run_round_async`.

use std::time::Duration;

use crate::engine::{EngineError, Pacer, ResolutionEvent, RouletteTable, RoundState, SpinSource};

/// Без ожидания.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _state: RoundState, _duration: Duration) {}
}

/// Блокирующий sleep текущего потока.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleepPacer;

impl Pacer for ThreadSleepPacer {
    fn pause(&mut self, _state: RoundState, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Ничего не ждёт, но запоминает запрошенные паузы.
#[derive(Clone, Debug, Default)]
pub struct RecordingPacer {
    pub pauses: Vec<(RoundState, Duration)>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, state: RoundState, duration: Duration) {
        self.pauses.push((state, duration));
    }
}

/// Асинхронный вариант `RouletteTable::run_round` поверх `tokio::time::sleep`.
///
/// Если future дропнуть посреди паузы, раунд остаётся в Spinning/Revealing;
/// хост должен вызвать `discard_round`.
pub async fn run_round_async<R: SpinSource>(
    table: &mut RouletteTable<R>,
) -> Result<ResolutionEvent, EngineError> {
    table.request_spin()?;

    while let Some(timer) = table.timer() {
        tokio::time::sleep(timer.remaining).await;
        if let Some(event) = table.on_time_passed(timer.remaining) {
            return Ok(event);
        }
    }

    Err(EngineError::NothingPending)
}
