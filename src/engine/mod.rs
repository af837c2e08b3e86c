//! Общее ядро для всех игр: источник случайности, ошибки,
//! проверка ставок и расчёт итогов раунда.
//!
//! Сами игры живут в `crate::blackjack`, `crate::roulette`, `crate::slots`
//! и пользуются только этим модулем.

pub mod errors;
pub mod settlement;
pub mod validation;

pub use errors::EngineError;
pub use settlement::{settle, settle_with, Settlement, StakeDeduction};
pub use validation::{ensure_stake_covered, validate_stake};

/// RNG интерфейс для engine.
///
/// Все игры тянут случайность ТОЛЬКО через этот трейт, поэтому в тестах
/// можно подставить детерминированный или заранее записанный источник
/// (см. `crate::infra::rng`).
pub trait RandomSource {
    /// Равномерное число в диапазоне [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Равномерный индекс в диапазоне [0, upper). При `upper == 0` вернёт 0.
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let idx = (self.next_f64() * upper as f64) as usize;
        // защита от источника, вернувшего ровно 1.0
        idx.min(upper - 1)
    }

    /// Перемешивание Фишера–Йетса: для i от последнего индекса до 1
    /// берём j из [0, i] и меняем местами i и j.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }
}

