use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::pocket::Pocket;

/// Колонка "2 to 1". Нумерация по рядам стола сверху вниз.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Column {
    First,
    Second,
    Third,
}

/// Дюжина: 1–12, 13–24, 25–36.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Dozen {
    First,
    Second,
    Third,
}

/// Половина колеса: 1–18 или 19–36.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Half {
    Low,
    High,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

/// Цвет, на который можно поставить (зелёного нет).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BetColor {
    Red,
    Black,
}

/// На что сделана ставка. Закрытый набор вариантов, он же ключ в леджере.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BetSelection {
    Straight(Pocket),
    Column(Column),
    Dozen(Dozen),
    Range(Half),
    Parity(Parity),
    Color(BetColor),
}

/// Группы внешних ставок, внутри которых активна максимум одна ставка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OutsideBetGroup {
    Dozen,
    Range,
    Parity,
    Color,
}

/// Вид ставки без параметров (строка паутейбла).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BetKind {
    Straight,
    Column,
    Dozen,
    Range,
    Parity,
    Color,
}

/// Метка ставки не распознана.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Неизвестная ставка: {0:?}")]
pub struct UnknownSelection(pub String);

impl BetSelection {
    /// Удобный конструктор для ставки на номер.
    pub fn straight(number: u8) -> Option<Self> {
        Pocket::new(number).map(BetSelection::Straight)
    }

    pub fn kind(&self) -> BetKind {
        match self {
            BetSelection::Straight(_) => BetKind::Straight,
            BetSelection::Column(_) => BetKind::Column,
            BetSelection::Dozen(_) => BetKind::Dozen,
            BetSelection::Range(_) => BetKind::Range,
            BetSelection::Parity(_) => BetKind::Parity,
            BetSelection::Color(_) => BetKind::Color,
        }
    }

    /// Группа взаимоисключения. У номеров и колонок её нет.
    pub fn group(&self) -> Option<OutsideBetGroup> {
        match self {
            BetSelection::Straight(_) | BetSelection::Column(_) => None,
            BetSelection::Dozen(_) => Some(OutsideBetGroup::Dozen),
            BetSelection::Range(_) => Some(OutsideBetGroup::Range),
            BetSelection::Parity(_) => Some(OutsideBetGroup::Parity),
            BetSelection::Color(_) => Some(OutsideBetGroup::Color),
        }
    }

    /// Полный перечень ставок стола: 37 номеров + 3 колонки + 9 внешних.
    pub fn all() -> Vec<BetSelection> {
        let mut out: Vec<BetSelection> = Pocket::all().map(BetSelection::Straight).collect();
        out.extend([Column::First, Column::Second, Column::Third].map(BetSelection::Column));
        for group in OutsideBetGroup::ALL {
            out.extend(group.members());
        }
        out
    }
}

impl OutsideBetGroup {
    pub const ALL: [OutsideBetGroup; 4] = [
        OutsideBetGroup::Dozen,
        OutsideBetGroup::Range,
        OutsideBetGroup::Parity,
        OutsideBetGroup::Color,
    ];

    /// Все ставки, входящие в группу.
    pub fn members(self) -> Vec<BetSelection> {
        match self {
            OutsideBetGroup::Dozen => [Dozen::First, Dozen::Second, Dozen::Third]
                .map(BetSelection::Dozen)
                .to_vec(),
            OutsideBetGroup::Range => [Half::Low, Half::High].map(BetSelection::Range).to_vec(),
            OutsideBetGroup::Parity => [Parity::Even, Parity::Odd]
                .map(BetSelection::Parity)
                .to_vec(),
            OutsideBetGroup::Color => [BetColor::Red, BetColor::Black]
                .map(BetSelection::Color)
                .to_vec(),
        }
    }
}

// Метки совпадают с надписями на столе.
impl fmt::Display for BetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BetSelection::Straight(p) => return write!(f, "{}", p),
            BetSelection::Column(Column::First) => "2 to 1 (1st)",
            BetSelection::Column(Column::Second) => "2 to 1 (2nd)",
            BetSelection::Column(Column::Third) => "2 to 1 (3rd)",
            BetSelection::Dozen(Dozen::First) => "1st 12",
            BetSelection::Dozen(Dozen::Second) => "2nd 12",
            BetSelection::Dozen(Dozen::Third) => "3rd 12",
            BetSelection::Range(Half::Low) => "1-18",
            BetSelection::Range(Half::High) => "19-36",
            BetSelection::Parity(Parity::Even) => "EVEN",
            BetSelection::Parity(Parity::Odd) => "ODD",
            BetSelection::Color(BetColor::Red) => "RED",
            BetSelection::Color(BetColor::Black) => "BLACK",
        };
        f.write_str(label)
    }
}

impl FromStr for BetSelection {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(n) = trimmed.parse::<u8>() {
            return BetSelection::straight(n).ok_or_else(|| UnknownSelection(s.to_string()));
        }

        let sel = match trimmed.to_ascii_uppercase().as_str() {
            "2 TO 1 (1ST)" => BetSelection::Column(Column::First),
            "2 TO 1 (2ND)" => BetSelection::Column(Column::Second),
            "2 TO 1 (3RD)" => BetSelection::Column(Column::Third),
            "1ST 12" => BetSelection::Dozen(Dozen::First),
            "2ND 12" => BetSelection::Dozen(Dozen::Second),
            "3RD 12" => BetSelection::Dozen(Dozen::Third),
            "1-18" => BetSelection::Range(Half::Low),
            "19-36" => BetSelection::Range(Half::High),
            "EVEN" => BetSelection::Parity(Parity::Even),
            "ODD" => BetSelection::Parity(Parity::Odd),
            "RED" => BetSelection::Color(BetColor::Red),
            "BLACK" => BetSelection::Color(BetColor::Black),
            _ => return Err(UnknownSelection(s.to_string())),
        };
        Ok(sel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for sel in BetSelection::all() {
            let label = sel.to_string();
            assert_eq!(label.parse::<BetSelection>(), Ok(sel), "label {label}");
        }
    }

    #[test]
    fn table_has_49_selections() {
        assert_eq!(BetSelection::all().len(), 37 + 3 + 3 + 2 + 2 + 2);
    }

    #[test]
    fn unknown_labels_rejected() {
        assert!("37".parse::<BetSelection>().is_err());
        assert!("GREEN".parse::<BetSelection>().is_err());
        assert!("".parse::<BetSelection>().is_err());
    }
}
