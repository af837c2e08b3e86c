use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::RoundId;

/// Генерация ID раундов на основе монотонного счётчика.
#[derive(Debug)]
pub struct IdGenerator {
    round_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор, первый ID = 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Продолжить нумерацию (например, после загрузки истории).
    pub fn starting_at(first: RoundId) -> Self {
        Self {
            round_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
