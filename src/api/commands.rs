use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{BetSelection, Chips};
use crate::engine::{RouletteTable, SpinSource};

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::get_state;

/// Команды, меняющие состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Клик по позиции: поставить или снять (с правилом "одна ставка на группу").
    ToggleSelection {
        selection: BetSelection,
        /// `None`: текущий выбранный номинал.
        token: Option<Chips>,
    },

    /// Докинуть фишку на позицию.
    PlaceBet {
        selection: BetSelection,
        token: Option<Chips>,
    },

    /// Сменить номинал фишки.
    SelectToken(Chips),

    /// Запустить колесо.
    RequestSpin,

    /// Завершить текущую фазу раунда без ожидания.
    Advance,
}

/// Разобрать надпись позиции стола ("RED", "2nd 12", "0").
pub fn selection_from_label(label: &str) -> Result<BetSelection, ApiError> {
    label.parse::<BetSelection>().map_err(ApiError::from)
}

/// Выполнить команду. При отказе `applied: false` и причина, состояние не меняется.
pub fn execute_command<R: SpinSource>(table: &mut RouletteTable<R>, command: Command) -> CommandResponse {
    let result: Result<Option<crate::engine::ResolutionEvent>, ApiError> = match &command {
        Command::ToggleSelection { selection, token } => table
            .toggle_selection(*selection, *token)
            .map(|_| None)
            .map_err(ApiError::from),
        Command::PlaceBet { selection, token } => table
            .place_bet(*selection, *token)
            .map(|_| None)
            .map_err(ApiError::from),
        Command::SelectToken(token) => table.select_token(*token).map(|_| None).map_err(ApiError::from),
        Command::RequestSpin => table.request_spin().map(|_| None).map_err(ApiError::from),
        Command::Advance => table.advance().map_err(ApiError::from),
    };

    let (applied, error, resolution) = match result {
        Ok(resolution) => (true, None, resolution),
        Err(err) => {
            warn!(?command, ?err, "команда отклонена");
            (false, Some(err), None)
        }
    };

    CommandResponse {
        applied,
        error,
        resolution,
        state: get_state(table),
    }
}

// Булевы обёртки для вызывающего кода, которому важен только факт применения.

pub fn place_bet<R: SpinSource>(table: &mut RouletteTable<R>, selection: BetSelection, token: Chips) -> bool {
    execute_command(
        table,
        Command::PlaceBet {
            selection,
            token: Some(token),
        },
    )
    .applied
}

pub fn toggle_selection<R: SpinSource>(
    table: &mut RouletteTable<R>,
    selection: BetSelection,
    token: Chips,
) -> bool {
    execute_command(
        table,
        Command::ToggleSelection {
            selection,
            token: Some(token),
        },
    )
    .applied
}

pub fn request_spin<R: SpinSource>(table: &mut RouletteTable<R>) -> bool {
    execute_command(table, Command::RequestSpin).applied
}
