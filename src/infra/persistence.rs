use std::collections::VecDeque;

use crate::domain::round::{GameType, RoundRecord};

/// Сколько записей держит журнал по умолчанию (старые вытесняются).
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Абстракция журнала сыгранных раундов.
///
/// Engine сам ничего не пишет: после расчёта раунда клиент
/// добавляет `RoundRecord` сюда. Журнал только дописывается.
/// Реальное хранилище (localStorage, БД) — забота клиента,
/// эта абстракция удобна для тестов и локального запуска.
pub trait RoundLog {
    /// Добавить запись о завершённом раунде.
    fn append(&mut self, record: RoundRecord);

    /// Все записи, от старых к новым.
    fn records(&self) -> Vec<RoundRecord>;

    /// Удалить всю историю.
    fn clear(&mut self);

    /// Последние `limit` записей, новые первыми.
    fn recent(&self, limit: usize) -> Vec<RoundRecord> {
        self.records().into_iter().rev().take(limit).collect()
    }

    /// Записи конкретной игры, от старых к новым.
    fn by_game(&self, game_type: GameType) -> Vec<RoundRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.game_type == game_type)
            .collect()
    }
}

/// Простая in-memory реализация с ограниченной ёмкостью.
#[derive(Debug, Clone)]
pub struct InMemoryRoundLog {
    capacity: usize,
    records: VecDeque<RoundRecord>,
}

impl InMemoryRoundLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryRoundLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundLog for InMemoryRoundLog {
    fn append(&mut self, record: RoundRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    fn records(&self) -> Vec<RoundRecord> {
        self.records.iter().cloned().collect()
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}
