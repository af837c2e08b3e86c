use crate::domain::chips::Chips;

use thiserror::Error;

/// Ошибки игрового движка.
///
/// Две основные категории:
/// - недопустимая ставка (`ZeroStake`, `StakeExceedsBalance`);
/// - недопустимое действие в текущем состоянии раунда (`IllegalAction`).
///
/// Ошибка всегда возвращается ДО изменения состояния раунда.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Ставка должна быть больше нуля")]
    ZeroStake,

    #[error("Ставка {stake} превышает доступный баланс {balance}")]
    StakeExceedsBalance { stake: Chips, balance: Chips },

    #[error("Действие `{action}` сейчас недопустимо: {reason}")]
    IllegalAction {
        action: &'static str,
        reason: &'static str,
    },

    #[error("Номер {0} не существует на колесе (0..=36)")]
    InvalidPocket(u8),

    #[error("Некорректная ставка рулетки: {0}")]
    InvalidBet(String),

    #[error("В колоде закончились карты")]
    DeckExhausted,

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn illegal(action: &'static str, reason: &'static str) -> Self {
        EngineError::IllegalAction { action, reason }
    }

    /// Категория InvalidStake: ставка <= 0 или больше баланса.
    pub fn is_invalid_stake(&self) -> bool {
        matches!(
            self,
            EngineError::ZeroStake | EngineError::StakeExceedsBalance { .. }
        )
    }

    /// Категория IllegalAction: действие не разрешено в текущей фазе раунда.
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, EngineError::IllegalAction { .. })
    }
}
