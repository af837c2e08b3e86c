use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество фишек (в минимальных единицах валюты). Обёртка над u64,
/// чтобы не путать с обычными числами.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

/// Знаковое изменение баланса / профит.
pub type ChipDelta = i64;

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Умножение на целый коэффициент выплаты.
    pub fn times(self, multiplier: u64) -> Chips {
        Chips(self.0.saturating_mul(multiplier))
    }

    /// Умножение на дробь `num/den` с округлением вниз (в пользу казино).
    pub fn mul_ratio(self, num: u64, den: u64) -> Chips {
        if den == 0 {
            return Chips::ZERO;
        }
        let wide = (self.0 as u128) * (num as u128) / (den as u128);
        Chips(u64::try_from(wide).unwrap_or(u64::MAX))
    }

    pub fn as_delta(self) -> ChipDelta {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    /// Применить знаковое изменение к балансу (не уходит ниже нуля).
    pub fn apply_delta(self, delta: ChipDelta) -> Chips {
        if delta >= 0 {
            self + Chips(delta as u64)
        } else {
            self.saturating_sub(Chips(delta.unsigned_abs()))
        }
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl core::iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}
