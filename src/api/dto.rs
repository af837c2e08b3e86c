use serde::{Deserialize, Serialize};

use crate::blackjack::{BlackjackPhase, BlackjackRound, BlackjackSummary};
use crate::domain::card::Card;
use crate::domain::chips::{ChipDelta, Chips};
use crate::domain::round::{Outcome, RoundRecord};
use crate::engine::Settlement;
use crate::roulette::{RouletteBet, RouletteOutcome, RoulettePhase, RouletteRound};
use crate::slots::{AutoPlay, AutoPlayStop, SlotSpin, SymbolCatalog, REELS, ROWS};

/// Денежный итог раунда для фронта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementDto {
    pub stake: Chips,
    pub payout: Chips,
    pub profit: ChipDelta,
    pub balance_delta: ChipDelta,
    pub outcome: Outcome,
}

impl From<&Settlement> for SettlementDto {
    fn from(s: &Settlement) -> Self {
        Self {
            stake: s.stake,
            payout: s.gross_return,
            profit: s.profit,
            balance_delta: s.balance_delta,
            outcome: s.outcome,
        }
    }
}

/// Стол блэкджека глазами игрока.
///
/// Пока игрок ходит, закрытая карта дилера не отдаётся:
/// в `dealer_cards` только открытые карты, а `dealer_hidden` = 1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackView {
    pub phase: BlackjackPhase,
    pub player_cards: Vec<Card>,
    pub player_score: u32,
    pub dealer_cards: Vec<Card>,
    pub dealer_hidden: usize,
    /// Счёт только по открытым картам.
    pub dealer_score: u32,
    pub stake: Chips,
    pub doubled: bool,
    pub can_deal: bool,
    pub can_hit: bool,
    pub can_stand: bool,
    pub can_double_down: bool,
    pub can_reset: bool,
    pub summary: Option<BlackjackSummary>,
}

impl BlackjackView {
    /// `balance` — текущий баланс клиента (ставка уже списана).
    pub fn from_round(round: &BlackjackRound, balance: Chips) -> Self {
        let dealer = round.dealer_hand();
        let hide_hole = round.phase() == BlackjackPhase::Playing && dealer.len() > 1;

        let (dealer_cards, dealer_hidden) = if hide_hole {
            (dealer.cards[..1].to_vec(), dealer.len() - 1)
        } else {
            (dealer.cards.clone(), 0)
        };
        let dealer_score = crate::eval::score(&dealer_cards);

        Self {
            phase: round.phase(),
            player_cards: round.player_hand().cards.clone(),
            player_score: round.player_hand().score(),
            dealer_cards,
            dealer_hidden,
            dealer_score,
            stake: round.stake(),
            doubled: round.is_doubled(),
            can_deal: round.can_deal(),
            can_hit: round.can_hit(),
            can_stand: round.can_stand(),
            can_double_down: round.can_double_down(balance),
            can_reset: round.can_reset(),
            summary: round.summary().copied(),
        }
    }
}

/// Стол рулетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteView {
    pub phase: RoulettePhase,
    pub bets: Vec<RouletteBet>,
    pub total_stake: Chips,
    pub can_place_bet: bool,
    pub can_spin: bool,
    pub outcome: Option<RouletteOutcome>,
}

impl RouletteView {
    pub fn from_round(round: &RouletteRound) -> Self {
        Self {
            phase: round.phase(),
            bets: round.bets().to_vec(),
            total_stake: round.total_stake(),
            can_place_bet: round.can_place_bet(),
            can_spin: round.can_spin(),
            outcome: round.outcome().cloned(),
        }
    }
}

/// Одно вращение автомата: символы по строкам (сверху вниз), линии, выигрыш.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSpinView {
    pub rows: Vec<Vec<String>>,
    pub winning_lines: Vec<usize>,
    pub base_win: Chips,
    pub multiplier: u64,
    pub total_win: Chips,
    pub settlement: SettlementDto,
}

impl SlotSpinView {
    pub fn from_spin(spin: &SlotSpin, catalog: &SymbolCatalog) -> Self {
        let rows = (0..ROWS)
            .map(|row| {
                (0..REELS)
                    .map(|reel| {
                        spin.grid
                            .symbol_at(reel, row)
                            .and_then(|id| catalog.get(id))
                            .map(|s| s.name.clone())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Self {
            rows,
            winning_lines: spin.evaluation.winning_lines.clone(),
            base_win: spin.evaluation.base_win,
            multiplier: spin.evaluation.multiplier,
            total_win: spin.evaluation.total_win,
            settlement: SettlementDto::from(&spin.settlement),
        }
    }
}

/// Состояние автоигры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoPlayView {
    pub active: bool,
    pub remaining: u32,
    pub stake: Chips,
    pub stop_reason: Option<AutoPlayStop>,
    pub last_spin: Option<SlotSpinView>,
}

impl AutoPlayView {
    pub fn from_auto(auto: &AutoPlay, last_spin: Option<SlotSpinView>) -> Self {
        Self {
            active: auto.is_active(),
            remaining: auto.remaining(),
            stake: auto.stake(),
            stop_reason: auto.stop_reason(),
            last_spin,
        }
    }
}

/// Что изменилось после команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game", content = "view", rename_all = "snake_case")]
pub enum GameView {
    Blackjack(BlackjackView),
    Roulette(RouletteView),
    Slots(SlotSpinView),
    AutoPlay(AutoPlayView),
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandResponse {
    /// Баланс после команды.
    pub balance: Chips,
    pub view: GameView,
    /// Запись истории, если команда завершила раунд.
    pub record: Option<RoundRecord>,
}
