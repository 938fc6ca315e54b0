//! Доменная модель рулетки: фишки, карманы колеса, виды ставок, баланс.

pub mod bankroll;
pub mod chips;
pub mod pocket;
pub mod selection;

pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Pocket и т.п.
pub use bankroll::*;
pub use chips::*;
pub use pocket::*;
pub use selection::*;
