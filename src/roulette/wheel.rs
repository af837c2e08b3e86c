use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, RandomSource};
use crate::roulette::bets::{BetOdds, RouletteBet};
use crate::domain::chips::Chips;

/// Наибольший номер на европейском колесе (один зеро).
pub const MAX_NUMBER: u8 = 36;
/// Всего ячеек: 0..=36.
pub const POCKETS: usize = 37;

/// Красные номера европейского колеса.
pub const EUROPEAN_RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Цвет ячейки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Red,
    Black,
}

/// Свойства выпавшего номера.
///
/// Для 0: зелёный, ни чёт ни нечет, ни high ни low, dozen = column = 0.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberProperties {
    pub number: u8,
    pub color: Color,
    pub is_odd: bool,
    pub is_even: bool,
    pub is_high: bool,
    pub is_low: bool,
    pub dozen: u8,
    pub column: u8,
}

/// Настройки рулетки: набор красных номеров и таблица коэффициентов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouletteConfig {
    pub red_numbers: Vec<u8>,
    pub odds: BetOdds,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            red_numbers: EUROPEAN_RED_NUMBERS.to_vec(),
            odds: BetOdds::default(),
        }
    }
}

impl RouletteConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen = [false; POCKETS];
        for &n in &self.red_numbers {
            if n == 0 || n > MAX_NUMBER {
                return Err(EngineError::InvalidConfig(format!(
                    "red number {n} must be in 1..=36"
                )));
            }
            if seen[n as usize] {
                return Err(EngineError::InvalidConfig(format!("red number {n} listed twice")));
            }
            seen[n as usize] = true;
        }
        if self.red_numbers.len() != 18 {
            return Err(EngineError::InvalidConfig(format!(
                "expected 18 red numbers, got {}",
                self.red_numbers.len()
            )));
        }
        self.odds.validate()
    }
}

/// Колесо: раскраска ячеек + таблица выплат.
///
/// В serde представлено как `RouletteConfig` и при разборе проходит
/// `RouletteConfig::validate`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RouletteConfig", into = "RouletteConfig")]
pub struct Wheel {
    red: Vec<bool>,
    odds: BetOdds,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::european()
    }
}

impl Wheel {
    /// Европейское колесо с коэффициентами заведения.
    pub fn european() -> Self {
        let mut red = vec![false; POCKETS];
        for n in EUROPEAN_RED_NUMBERS {
            red[n as usize] = true;
        }
        Self {
            red,
            odds: BetOdds::default(),
        }
    }

    pub fn from_config(config: &RouletteConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut red = vec![false; POCKETS];
        for &n in &config.red_numbers {
            red[n as usize] = true;
        }
        Ok(Self {
            red,
            odds: config.odds.clone(),
        })
    }

    pub fn odds(&self) -> &BetOdds {
        &self.odds
    }

    pub fn classify(&self, number: u8) -> Result<NumberProperties, EngineError> {
        if number > MAX_NUMBER {
            return Err(EngineError::InvalidPocket(number));
        }

        if number == 0 {
            return Ok(NumberProperties {
                number,
                color: Color::Green,
                is_odd: false,
                is_even: false,
                is_high: false,
                is_low: false,
                dozen: 0,
                column: 0,
            });
        }

        let is_red = self.red.get(number as usize).copied().unwrap_or(false);
        let color = if is_red {
            Color::Red
        } else {
            Color::Black
        };

        Ok(NumberProperties {
            number,
            color,
            is_odd: number % 2 == 1,
            is_even: number % 2 == 0,
            is_high: number >= 19,
            is_low: number <= 18,
            dozen: number.div_ceil(12),
            column: (number - 1) % 3 + 1,
        })
    }

    /// Один равномерный номер из 0..=36.
    pub fn spin<R: RandomSource>(&self, rng: &mut R) -> u8 {
        rng.next_index(POCKETS) as u8
    }

    /// Выплата по ставке: `amount * odds` при выигрыше, иначе 0.
    /// Ставка игрока в выплату не входит — её списание решает клиент.
    pub fn resolve_bet(&self, bet: &RouletteBet, winning_number: u8) -> Result<Chips, EngineError> {
        let props = self.classify(winning_number)?;
        if bet.kind.wins(&props) {
            Ok(bet.amount.times(bet.odds))
        } else {
            Ok(Chips::ZERO)
        }
    }
}

impl TryFrom<RouletteConfig> for Wheel {
    type Error = EngineError;

    fn try_from(config: RouletteConfig) -> Result<Self, Self::Error> {
        Wheel::from_config(&config)
    }
}

impl From<Wheel> for RouletteConfig {
    fn from(wheel: Wheel) -> Self {
        let red_numbers = wheel
            .red
            .iter()
            .enumerate()
            .filter(|(_, red)| **red)
            .map(|(n, _)| n as u8)
            .collect();
        RouletteConfig {
            red_numbers,
            odds: wheel.odds,
        }
    }
}

/// Свойства номера на стандартном европейском колесе.
pub fn classify(number: u8) -> Result<NumberProperties, EngineError> {
    Wheel::european().classify(number)
}

/// Вращение стандартного колеса.
pub fn spin<R: RandomSource>(rng: &mut R) -> u8 {
    Wheel::european().spin(rng)
}

/// Расчёт одной ставки на стандартном колесе.
pub fn resolve_bet(bet: &RouletteBet, winning_number: u8) -> Result<Chips, EngineError> {
    Wheel::european().resolve_bet(bet, winning_number)
}
