use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Ставка <= 0 или больше баланса.
    InvalidStake(String),

    /// Действие не разрешено в текущей фазе раунда.
    IllegalAction(String),

    /// Прочие ошибки движка (некорректная ставка рулетки, колода и т.п.).
    EngineError(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::InvalidStake(m)
            | ApiError::IllegalAction(m)
            | ApiError::EngineError(m) => m,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if err.is_invalid_stake() {
            ApiError::InvalidStake(err.to_string())
        } else if err.is_illegal_action() {
            ApiError::IllegalAction(err.to_string())
        } else {
            ApiError::EngineError(err.to_string())
        }
    }
}
