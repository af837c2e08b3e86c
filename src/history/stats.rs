use serde::{Deserialize, Serialize};

use crate::domain::chips::{ChipDelta, Chips};
use crate::domain::round::{GameType, Outcome, RoundRecord};
use crate::domain::Timestamp;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Номер UTC-дня для unix-времени.
pub fn day_of(timestamp: Timestamp) -> u64 {
    timestamp / SECONDS_PER_DAY
}

/// Сводка по набору раундов.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    pub total_games: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub total_wagered: Chips,
    pub total_won: Chips,
    pub net_profit: ChipDelta,
    /// Процент выигранных раундов, 0..=100.
    pub win_rate: f64,
    /// Самая частая игра; при равенстве — первая в порядке blackjack, roulette, slots.
    pub favourite_game: Option<GameType>,
    /// Наибольший профит за раунд, не меньше 0.
    pub biggest_win: ChipDelta,
    /// Наименьший профит за раунд, не больше 0.
    pub biggest_loss: ChipDelta,
    pub average_bet: f64,
    /// `total_won / wins`.
    pub average_win: f64,
    pub games_today: u64,
    pub profit_today: ChipDelta,
    /// Раундов в день, считая от дня самой старой записи до сегодня включительно.
    pub average_games_per_day: f64,
}

impl SessionStats {
    pub fn compute(records: &[RoundRecord], now: Timestamp) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let today = day_of(now);
        let mut stats = SessionStats {
            biggest_win: 0,
            biggest_loss: 0,
            ..Self::default()
        };
        let mut per_game = [0u64; 3];
        let mut oldest_day = today;

        for r in records {
            stats.total_games += 1;
            match r.outcome {
                Outcome::Win => stats.wins += 1,
                Outcome::Lose => stats.losses += 1,
                Outcome::Push => stats.pushes += 1,
            }
            stats.total_wagered += r.stake;
            stats.total_won += r.payout;
            stats.net_profit += r.profit;
            stats.biggest_win = stats.biggest_win.max(r.profit);
            stats.biggest_loss = stats.biggest_loss.min(r.profit);

            per_game[game_index(r.game_type)] += 1;

            let day = day_of(r.timestamp);
            oldest_day = oldest_day.min(day);
            if day == today {
                stats.games_today += 1;
                stats.profit_today += r.profit;
            }
        }

        let games = stats.total_games as f64;
        stats.win_rate = stats.wins as f64 / games * 100.0;
        stats.average_bet = stats.total_wagered.0 as f64 / games;
        stats.average_win = if stats.wins > 0 {
            stats.total_won.0 as f64 / stats.wins as f64
        } else {
            0.0
        };

        let days = (today - oldest_day + 1).max(1);
        stats.average_games_per_day = games / days as f64;

        let mut best: Option<(GameType, u64)> = None;
        for game in GameType::ALL {
            let count = per_game[game_index(game)];
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((game, count));
            }
        }
        stats.favourite_game = best.map(|(g, _)| g);

        stats
    }
}

fn game_index(game: GameType) -> usize {
    match game {
        GameType::Blackjack => 0,
        GameType::Roulette => 1,
        GameType::Slots => 2,
    }
}

/// Итоги одного UTC-дня.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStats {
    /// Начало дня, unix-секунды.
    pub day_start: Timestamp,
    pub games: u64,
    pub wagered: Chips,
    pub won: Chips,
    pub profit: ChipDelta,
}

/// Последние `days` дней (включая сегодня), от старого к новому.
/// Дни без игр тоже попадают в результат, с нулями.
pub fn daily_stats(records: &[RoundRecord], now: Timestamp, days: u32) -> Vec<DailyStats> {
    let today = day_of(now);
    let days = days as u64;
    let first = (today + 1).saturating_sub(days);

    let mut out: Vec<DailyStats> = (first..=today)
        .map(|day| DailyStats {
            day_start: day * SECONDS_PER_DAY,
            ..DailyStats::default()
        })
        .collect();
    for r in records {
        let day = day_of(r.timestamp);
        if day < first || day > today {
            continue;
        }
        let slot = &mut out[(day - first) as usize];
        slot.games += 1;
        slot.wagered += r.stake;
        slot.won += r.payout;
        slot.profit += r.profit;
    }

    out
}

/// Сводка отдельно по каждой игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameTypeStats {
    pub game_type: GameType,
    pub stats: SessionStats,
}

/// По одной сводке на каждую игру, в порядке `GameType::ALL`.
pub fn per_game_stats(records: &[RoundRecord], now: Timestamp) -> Vec<GameTypeStats> {
    GameType::ALL
        .iter()
        .map(|&game_type| {
            let subset: Vec<RoundRecord> = records
                .iter()
                .filter(|r| r.game_type == game_type)
                .cloned()
                .collect();
            GameTypeStats {
                game_type,
                stats: SessionStats::compute(&subset, now),
            }
        })
        .collect()
}
