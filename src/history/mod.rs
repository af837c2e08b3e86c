//! Производные метрики по журналу раундов.
//!
//! Ничего не хранит: все функции принимают срез `RoundRecord`
//! и текущее время от клиента.

pub mod stats;

pub use stats::{daily_stats, day_of, per_game_stats, DailyStats, GameTypeStats, SessionStats, SECONDS_PER_DAY};
