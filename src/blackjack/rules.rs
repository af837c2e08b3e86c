use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;
use crate::engine::EngineError;

/// Коэффициент выплаты в виде дроби `num:den` (например, 3:2).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutRatio {
    pub num: u64,
    pub den: u64,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: PayoutRatio = PayoutRatio { num: 3, den: 2 };

    /// Чистый выигрыш по этому коэффициенту (округление вниз).
    pub fn profit_on(&self, stake: Chips) -> Chips {
        stake.mul_ratio(self.num, self.den)
    }
}

/// Правила стола блэкджека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlackjackRules {
    /// Дилер добирает, пока счёт меньше этого значения.
    pub dealer_stands_on: u32,
    /// Выплата за натуральный блэкджек (сверх возвращённой ставки).
    pub blackjack_payout: PayoutRatio,
    pub allow_double_down: bool,
}

impl Default for BlackjackRules {
    /// Правила заведения: 3:2 за блэкджек, дилер стоит на 17, удвоение разрешено.
    fn default() -> Self {
        Self {
            dealer_stands_on: 17,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            allow_double_down: true,
        }
    }
}

impl BlackjackRules {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=21).contains(&self.dealer_stands_on) {
            return Err(EngineError::InvalidConfig(format!(
                "dealer_stands_on must be in 1..=21, got {}",
                self.dealer_stands_on
            )));
        }
        if self.blackjack_payout.den == 0 {
            return Err(EngineError::InvalidConfig(
                "blackjack_payout denominator must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Должен ли дилер взять ещё карту.
    pub fn dealer_should_draw(&self, hand: &Hand) -> bool {
        hand.score() < self.dealer_stands_on
    }
}

/// Результат раунда блэкджека.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlackjackResult {
    /// Натуральный блэкджек игрока.
    Blackjack,
    Win,
    Push,
    Lose,
}

impl BlackjackResult {
    /// Валовый возврат игроку:
    ///   blackjack -> ставка + ставка * 3/2 (2.5x),
    ///   win       -> 2x,
    ///   push      -> 1x,
    ///   lose      -> 0.
    pub fn gross_return(&self, stake: Chips, rules: &BlackjackRules) -> Chips {
        match self {
            BlackjackResult::Blackjack => stake + rules.blackjack_payout.profit_on(stake),
            BlackjackResult::Win => stake.times(2),
            BlackjackResult::Push => stake,
            BlackjackResult::Lose => Chips::ZERO,
        }
    }
}
