use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::EngineError;
use crate::roulette::wheel::{Color, NumberProperties, MAX_NUMBER};

/// Цвет, на который можно поставить (зелёный зеро — только ставкой на номер).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BetColor {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Odd,
    Even,
}

/// Половина поля: low = 1..18, high = 19..36.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Low,
    High,
}

/// Вид ставки с её значением.
///
/// В JSON выглядит как `{"type": "number", "value": 17}`,
/// `{"type": "color", "value": "red"}` и т.д.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BetKind {
    /// Один номер 0..=36.
    Number(u8),
    Color(BetColor),
    OddEven(Parity),
    HighLow(Half),
    /// Дюжина 1..=3.
    Dozen(u8),
    /// Колонка 1..=3.
    Column(u8),
}

impl BetKind {
    /// Разбор пары (тип, значение) в строковом виде, как их присылает фронт.
    pub fn parse(bet_type: &str, value: &str) -> Result<Self, EngineError> {
        let bad = || EngineError::InvalidBet(format!("{bet_type}={value}"));

        let kind = match bet_type {
            "number" => BetKind::Number(value.parse().map_err(|_| bad())?),
            "color" => match value {
                "red" => BetKind::Color(BetColor::Red),
                "black" => BetKind::Color(BetColor::Black),
                _ => return Err(bad()),
            },
            "odd_even" => match value {
                "odd" => BetKind::OddEven(Parity::Odd),
                "even" => BetKind::OddEven(Parity::Even),
                _ => return Err(bad()),
            },
            "high_low" => match value {
                "high" => BetKind::HighLow(Half::High),
                "low" => BetKind::HighLow(Half::Low),
                _ => return Err(bad()),
            },
            "dozen" => BetKind::Dozen(value.parse().map_err(|_| bad())?),
            "column" => BetKind::Column(value.parse().map_err(|_| bad())?),
            _ => return Err(bad()),
        };

        kind.validate()?;
        Ok(kind)
    }

    /// Проверка диапазона значения.
    pub fn validate(&self) -> Result<(), EngineError> {
        match *self {
            BetKind::Number(n) if n > MAX_NUMBER => {
                Err(EngineError::InvalidBet(format!("number {n} is off the wheel")))
            }
            BetKind::Dozen(d) if !(1..=3).contains(&d) => {
                Err(EngineError::InvalidBet(format!("dozen must be 1..=3, got {d}")))
            }
            BetKind::Column(c) if !(1..=3).contains(&c) => {
                Err(EngineError::InvalidBet(format!("column must be 1..=3, got {c}")))
            }
            _ => Ok(()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            BetKind::Number(_) => "number",
            BetKind::Color(_) => "color",
            BetKind::OddEven(_) => "odd_even",
            BetKind::HighLow(_) => "high_low",
            BetKind::Dozen(_) => "dozen",
            BetKind::Column(_) => "column",
        }
    }

    /// Выиграла ли ставка при данном номере.
    pub fn wins(&self, props: &NumberProperties) -> bool {
        match *self {
            BetKind::Number(n) => n == props.number,
            BetKind::Color(BetColor::Red) => props.color == Color::Red,
            BetKind::Color(BetColor::Black) => props.color == Color::Black,
            BetKind::OddEven(Parity::Odd) => props.is_odd,
            BetKind::OddEven(Parity::Even) => props.is_even,
            BetKind::HighLow(Half::High) => props.is_high,
            BetKind::HighLow(Half::Low) => props.is_low,
            BetKind::Dozen(d) => props.dozen == d,
            BetKind::Column(c) => props.column == c,
        }
    }
}

/// Таблица коэффициентов (множитель к сумме ставки при выигрыше).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BetOdds {
    pub number: u64,
    pub color: u64,
    pub odd_even: u64,
    pub high_low: u64,
    pub dozen: u64,
    pub column: u64,
}

impl Default for BetOdds {
    fn default() -> Self {
        Self {
            number: 35,
            color: 2,
            odd_even: 2,
            high_low: 2,
            dozen: 3,
            column: 3,
        }
    }
}

impl BetOdds {
    pub fn multiplier(&self, kind: &BetKind) -> u64 {
        match kind {
            BetKind::Number(_) => self.number,
            BetKind::Color(_) => self.color,
            BetKind::OddEven(_) => self.odd_even,
            BetKind::HighLow(_) => self.high_low,
            BetKind::Dozen(_) => self.dozen,
            BetKind::Column(_) => self.column,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let all = [
            ("number", self.number),
            ("color", self.color),
            ("odd_even", self.odd_even),
            ("high_low", self.high_low),
            ("dozen", self.dozen),
            ("column", self.column),
        ];
        if let Some((name, _)) = all.iter().find(|(_, v)| *v == 0) {
            return Err(EngineError::InvalidConfig(format!("odds for {name} must be non-zero")));
        }
        Ok(())
    }
}

/// Ставка на столе рулетки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteBet {
    pub kind: BetKind,
    pub amount: Chips,
    /// Множитель выплаты, зафиксированный при размещении.
    pub odds: u64,
}

impl RouletteBet {
    /// Ставка с коэффициентом из таблицы.
    pub fn new(kind: BetKind, amount: Chips, odds: &BetOdds) -> Self {
        Self {
            kind,
            amount,
            odds: odds.multiplier(&kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_frontend_strings() {
        assert_eq!(BetKind::parse("number", "17").unwrap(), BetKind::Number(17));
        assert_eq!(
            BetKind::parse("color", "black").unwrap(),
            BetKind::Color(BetColor::Black)
        );
        assert_eq!(BetKind::parse("dozen", "2").unwrap(), BetKind::Dozen(2));
    }

    #[test]
    fn parse_rejects_out_of_range_and_unknown() {
        assert!(BetKind::parse("number", "37").is_err());
        assert!(BetKind::parse("column", "0").is_err());
        assert!(BetKind::parse("color", "green").is_err());
        assert!(BetKind::parse("split", "1-2").is_err());
    }

    #[test]
    fn bet_kind_json_shape_is_tagged() {
        let json = serde_json::to_string(&BetKind::HighLow(Half::High)).unwrap();
        assert_eq!(json, r#"{"type":"high_low","value":"high"}"#);
    }
}
