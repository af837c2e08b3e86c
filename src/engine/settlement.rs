use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::chips::{ChipDelta, Chips};
use crate::domain::round::{GameType, Outcome, RoundRecord};
use crate::domain::{RoundId, Timestamp};

/// Когда ставка была списана с баланса.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StakeDeduction {
    /// Ставка уже списана при старте раунда (так работают все три игры).
    /// Для расчёта клиенту остаётся зачислить валовый возврат.
    #[default]
    Upfront,
    /// Ставка ещё на балансе: при расчёте клиент применяет чистый профит.
    AtSettlement,
}

/// Итог раунда в деньгах. Единый расчёт для всех игр,
/// чтобы знаки и округления нигде не расходились.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub stake: Chips,
    pub gross_return: Chips,
    /// Что клиент должен прибавить к балансу прямо сейчас.
    pub balance_delta: ChipDelta,
    /// `gross_return - stake`.
    pub profit: ChipDelta,
    pub outcome: Outcome,
}

impl Settlement {
    /// Сформировать запись истории для этого раунда.
    pub fn to_record(&self, id: RoundId, game_type: GameType, timestamp: Timestamp) -> RoundRecord {
        RoundRecord {
            id,
            game_type,
            stake: self.stake,
            payout: self.gross_return,
            profit: self.profit,
            outcome: self.outcome,
            timestamp,
        }
    }
}

/// Расчёт раунда, ставка которого уже списана с баланса.
pub fn settle(stake: Chips, gross_return: Chips) -> Settlement {
    settle_with(stake, gross_return, StakeDeduction::Upfront)
}

/// Расчёт раунда с явным указанием, списана ли ставка.
///
/// profit == 0 -> push, profit > 0 -> win, иначе lose.
pub fn settle_with(stake: Chips, gross_return: Chips, deduction: StakeDeduction) -> Settlement {
    let profit = gross_return.as_delta() - stake.as_delta();

    let outcome = if profit == 0 {
        Outcome::Push
    } else if profit > 0 {
        Outcome::Win
    } else {
        Outcome::Lose
    };

    let balance_delta = match deduction {
        StakeDeduction::Upfront => gross_return.as_delta(),
        StakeDeduction::AtSettlement => profit,
    };

    debug!(
        stake = stake.0,
        gross_return = gross_return.0,
        profit,
        ?outcome,
        "round settled"
    );

    Settlement {
        stake,
        gross_return,
        balance_delta,
        profit,
        outcome,
    }
}
