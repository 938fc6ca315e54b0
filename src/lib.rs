//! Движок европейской рулетки (одно зеро, 37 карманов) для одного игрока.
//!
//! Слои:
//! - `domain`: фишки, карманы, виды ставок, баланс;
//! - `engine`: леджер ставок, выплаты, жизненный цикл раунда, история;
//! - `infra`: RNG, паузы, конфиг, логирование;
//! - `api`: команды, запросы и DTO для фронта.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use domain::{BetSelection, Chips, Pocket};
pub use engine::{EngineError, ResolutionEvent, RouletteTable, RoundState};
pub use infra::TableConfig;
