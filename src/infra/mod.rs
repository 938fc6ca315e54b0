//! Инфраструктурный слой вокруг движка рулетки:
//! - генерация ID раундов;
//! - RNG-реализации для колеса;
//! - паузы между фазами;
//! - конфиг стола и логирование.

pub mod config;
pub mod ids;
pub mod logging;
pub mod pacing;
pub mod rng;

pub use config::{ConfigError, ConfigLoader, TableConfig};
pub use ids::*;
pub use logging::init_tracing;
pub use pacing::*;
pub use rng::*;
