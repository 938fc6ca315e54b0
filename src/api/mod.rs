//! Граница движка для UI / сетевого хендлера.
//!
//! `commands` меняют стол (ставки, номинал, спин), `queries` только читают,
//! `dto` отдаются фронту как есть, `errors` описывают отказы для клиента.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
