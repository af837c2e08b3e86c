use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::round::RoundRecord;
use crate::history::{DailyStats, GameTypeStats, SessionStats};

use super::dto::{AutoPlayView, BlackjackView, RouletteView};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    Balance,
    BlackjackTable,
    RouletteTable,
    AutoPlay,
    /// Последние `limit` раундов, новые первыми.
    RecentHistory { limit: usize },
    Stats,
    GameStats,
    /// Итоги по дням за последние `days` дней.
    DailyStats { days: u32 },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QueryResponse {
    Balance(Chips),
    BlackjackTable(BlackjackView),
    RouletteTable(RouletteView),
    AutoPlay(Option<AutoPlayView>),
    History(Vec<RoundRecord>),
    Stats(SessionStats),
    GameStats(Vec<GameTypeStats>),
    DailyStats(Vec<DailyStats>),
}
