use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::roulette::BetKind;

/// Команда верхнего уровня.
///
/// В JSON: `{"game": "blackjack", "action": {"type": "deal", "stake": 10}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", content = "action", rename_all = "snake_case")]
pub enum Command {
    Blackjack(BlackjackCommand),
    Roulette(RouletteCommand),
    Slots(SlotsCommand),
}

/// Действия за столом блэкджека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlackjackCommand {
    /// Принять ставку и раздать карты.
    Deal { stake: Chips },
    Hit,
    Stand,
    /// Удвоить ставку и взять ровно одну карту.
    DoubleDown,
    /// Один шаг дилера (фронт вызывает его с паузами для анимации).
    DealerStep,
    /// Доиграть за дилера целиком.
    PlayDealer,
    /// Вернуться к приёму ставки.
    Reset,
}

/// Действия за столом рулетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouletteCommand {
    PlaceBet { bet: BetKind, amount: Chips },
    ClearBets,
    /// Списать ставки, вращать, рассчитать.
    Spin,
    Reset,
}

/// Действия у слот-автомата.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotsCommand {
    Spin { stake: Chips },
    /// Начать серию из `count` вращений со ставкой `stake`.
    StartAutoPlay { count: u32, stake: Chips },
    /// Следующее вращение серии.
    AutoPlayStep,
    StopAutoPlay,
}
