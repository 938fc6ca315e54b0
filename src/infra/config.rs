//! Настройки стола: стартовый баланс, паузы фаз, размер истории, номиналы фишек.
//!
//! Источники по приоритету: значения по умолчанию → TOML-файл → переменные окружения.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Chips;
use crate::engine::history::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY};

pub const ENV_STARTING_BANKROLL: &str = "ROULETTE_STARTING_BANKROLL";
pub const ENV_SPIN_DELAY_MS: &str = "ROULETTE_SPIN_DELAY_MS";
pub const ENV_REVEAL_DELAY_MS: &str = "ROULETTE_REVEAL_DELAY_MS";
pub const ENV_HISTORY_CAPACITY: &str = "ROULETTE_HISTORY_CAPACITY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ошибка разбора TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Некорректное значение {field}={value}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Конфиг стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub starting_bankroll: Chips,
    /// Пауза "колесо крутится" до выпадения номера.
    pub spin_delay_ms: u64,
    /// Пауза между показом номера и расчётом. При 0 фаза Revealing пропускается.
    pub reveal_delay_ms: u64,
    pub history_capacity: usize,
    /// Доступные номиналы фишек.
    pub token_values: Vec<Chips>,
    pub default_token: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_bankroll: Chips(5_000),
            spin_delay_ms: 3_000,
            reveal_delay_ms: 1_500,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            token_values: [20, 50, 100, 200, 250, 500, 1_000].map(Chips).to_vec(),
            default_token: Chips(100),
        }
    }
}

impl TableConfig {
    /// Упрощённый вариант стола: короткий спин, без фазы показа.
    pub fn simple() -> Self {
        Self {
            spin_delay_ms: 500,
            reveal_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Без пауз, для тестов и симуляций.
    pub fn quick() -> Self {
        Self {
            spin_delay_ms: 0,
            reveal_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_bankroll(mut self, bankroll: Chips) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    pub fn spin_delay(&self) -> Duration {
        Duration::from_millis(self.spin_delay_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity", "0", "история должна хранить хотя бы один раунд"));
        }
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(invalid(
                "history_capacity",
                &self.history_capacity.to_string(),
                &format!("не больше {MAX_HISTORY_CAPACITY} раундов"),
            ));
        }
        if self.token_values.is_empty() {
            return Err(invalid("token_values", "[]", "нужен хотя бы один номинал"));
        }
        if let Some(zero) = self.token_values.iter().find(|t| t.is_zero()) {
            return Err(invalid("token_values", &zero.to_string(), "номинал должен быть > 0"));
        }
        if !self.token_values.contains(&self.default_token) {
            return Err(invalid(
                "default_token",
                &self.default_token.to_string(),
                "номинал по умолчанию должен быть среди token_values",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Загрузчик конфига: файл (опционально) + переменные окружения + валидация.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Загрузить из файла и переменных процесса.
    pub fn load(&self) -> Result<TableConfig, ConfigError> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// То же, но переменные берутся из `lookup` (удобно в тестах).
    pub fn load_with_env<F>(&self, lookup: F) -> Result<TableConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&content)?
            }
            None => TableConfig::default(),
        };

        apply_env_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: String, reason: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        value: raw.clone(),
        reason: reason.to_string(),
    })
}

fn apply_env_overrides<F>(config: &mut TableConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_STARTING_BANKROLL) {
        config.starting_bankroll = Chips(parse_var(ENV_STARTING_BANKROLL, raw, "ожидается целое число")?);
    }
    if let Some(raw) = lookup(ENV_SPIN_DELAY_MS) {
        config.spin_delay_ms = parse_var(ENV_SPIN_DELAY_MS, raw, "ожидаются миллисекунды")?;
    }
    if let Some(raw) = lookup(ENV_REVEAL_DELAY_MS) {
        config.reveal_delay_ms = parse_var(ENV_REVEAL_DELAY_MS, raw, "ожидаются миллисекунды")?;
    }
    if let Some(raw) = lookup(ENV_HISTORY_CAPACITY) {
        config.history_capacity = parse_var(ENV_HISTORY_CAPACITY, raw, "ожидается размер истории")?;
    }
    Ok(())
}
