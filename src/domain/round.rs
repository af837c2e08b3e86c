use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::{ChipDelta, Chips};
use crate::domain::{RoundId, Timestamp};

/// Тип игры. Определяется тем, какой движок вызывал клиент.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Blackjack,
    Roulette,
    Slots,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::Blackjack, GameType::Roulette, GameType::Slots];
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameType::Blackjack => "blackjack",
            GameType::Roulette => "roulette",
            GameType::Slots => "slots",
        };
        f.write_str(name)
    }
}

/// Итог раунда с точки зрения игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
    Push,
}

/// Запись о завершённом раунде. Engine только формирует поля,
/// сохраняет их клиент (см. `infra::persistence::RoundLog`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub id: RoundId,
    pub game_type: GameType,
    /// Сколько всего поставлено в раунде (с учётом double down / всех ставок рулетки).
    pub stake: Chips,
    /// Валовый возврат игроку (0 при проигрыше, ставка при push).
    pub payout: Chips,
    /// `payout - stake`.
    pub profit: ChipDelta,
    pub outcome: Outcome,
    /// Unix-время (секунды), которое передал клиент.
    pub timestamp: Timestamp,
}
