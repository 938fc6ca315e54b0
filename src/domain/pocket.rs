use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::selection::{Column, Dozen, Half};

/// Количество карманов европейского колеса (0..=36).
pub const POCKET_COUNT: u8 = 37;

/// Красные номера колеса. Фиксированная таблица, не вычисляется.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Цвет кармана. У нуля цвета нет (зелёный).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PocketColor {
    Red,
    Black,
    Green,
}

/// Номер кармана колеса, всегда в диапазоне 0..=36.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Pocket(u8);

impl Pocket {
    pub const ZERO: Pocket = Pocket(0);

    /// `None`, если номер вне колеса.
    pub fn new(number: u8) -> Option<Self> {
        if number < POCKET_COUNT {
            Some(Pocket(number))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn color(self) -> PocketColor {
        if self.0 == 0 {
            PocketColor::Green
        } else if RED_NUMBERS.contains(&self.0) {
            PocketColor::Red
        } else {
            PocketColor::Black
        }
    }

    /// Колонка "2 to 1" по раскладке стола: верхний ряд (3, 6, …, 36) — первая.
    pub fn column(self) -> Option<Column> {
        match self.0 {
            0 => None,
            n if n % 3 == 0 => Some(Column::First),
            n if n % 3 == 2 => Some(Column::Second),
            _ => Some(Column::Third),
        }
    }

    pub fn dozen(self) -> Option<Dozen> {
        match self.0 {
            1..=12 => Some(Dozen::First),
            13..=24 => Some(Dozen::Second),
            25..=36 => Some(Dozen::Third),
            _ => None,
        }
    }

    pub fn half(self) -> Option<Half> {
        match self.0 {
            1..=18 => Some(Half::Low),
            19..=36 => Some(Half::High),
            _ => None,
        }
    }

    /// Все карманы колеса по порядку.
    pub fn all() -> impl Iterator<Item = Pocket> {
        (0..POCKET_COUNT).map(Pocket)
    }
}

impl TryFrom<u8> for Pocket {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Pocket::new(value).ok_or_else(|| format!("карман {value} вне колеса 0..=36"))
    }
}

impl From<Pocket> for u8 {
    fn from(p: Pocket) -> u8 {
        p.0
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
