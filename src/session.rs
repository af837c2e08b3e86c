//! Сессия игрока: баланс, по одному раунду каждой игры, журнал.
//!
//! Сами игры баланс не трогают. Сессия делает то, что иначе делал бы UI:
//! списывает ставку при старте раунда, зачисляет `balance_delta` после
//! расчёта и дописывает `RoundRecord` в журнал.

use tracing::{debug, info};

use crate::api::{
    ApiError, AutoPlayView, BlackjackCommand, BlackjackView, Command, CommandResponse, GameView,
    Query, QueryResponse, RouletteCommand, RouletteView, SlotSpinView, SlotsCommand,
};
use crate::blackjack::{BlackjackRound, BlackjackStatus};
use crate::config::CasinoConfig;
use crate::domain::chips::Chips;
use crate::domain::round::{GameType, RoundRecord};
use crate::domain::Timestamp;
use crate::engine::{validate_stake, EngineError, RandomSource, Settlement};
use crate::history::{daily_stats, per_game_stats, SessionStats};
use crate::infra::{IdGenerator, InMemoryRoundLog, RoundLog};
use crate::roulette::RouletteRound;
use crate::slots::{AutoPlay, SlotMachine, SlotSpin};

pub struct CasinoSession<R: RandomSource, L: RoundLog = InMemoryRoundLog> {
    balance: Chips,
    rng: R,
    blackjack: BlackjackRound,
    roulette: RouletteRound,
    slots: SlotMachine,
    auto_play: Option<AutoPlay>,
    log: L,
    ids: IdGenerator,
}

impl<R: RandomSource> CasinoSession<R, InMemoryRoundLog> {
    pub fn new(config: CasinoConfig, balance: Chips, rng: R) -> Result<Self, EngineError> {
        Self::with_log(config, balance, rng, InMemoryRoundLog::new())
    }
}

impl<R: RandomSource, L: RoundLog> CasinoSession<R, L> {
    /// Сессия поверх уже существующего журнала; нумерация раундов
    /// продолжается после последней записи.
    pub fn with_log(config: CasinoConfig, balance: Chips, rng: R, log: L) -> Result<Self, EngineError> {
        config.validate()?;
        let next_id = log.records().iter().map(|r| r.id).max().map_or(1, |id| id + 1);

        Ok(Self {
            balance,
            rng,
            blackjack: BlackjackRound::new(config.blackjack),
            roulette: RouletteRound::from_config(&config.roulette)?,
            slots: SlotMachine::from_config(config.slots)?,
            auto_play: None,
            log,
            ids: IdGenerator::starting_at(next_id),
        })
    }

    pub fn balance(&self) -> Chips {
        self.balance
    }

    pub fn blackjack(&self) -> &BlackjackRound {
        &self.blackjack
    }

    pub fn roulette(&self) -> &RouletteRound {
        &self.roulette
    }

    pub fn slots(&self) -> &SlotMachine {
        &self.slots
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Сменить источник случайности перед следующим раундом
    /// (например, на `RngSeed::derive(..).to_rng()`). Уже сданные
    /// карты и поставленные ставки не меняются.
    pub fn reseed(&mut self, rng: R) {
        debug!("session rng replaced");
        self.rng = rng;
    }

    /// Разобрать JSON-команду и выполнить её.
    pub fn execute_json(&mut self, json: &str, now: Timestamp) -> Result<CommandResponse, ApiError> {
        let command: Command =
            serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        self.execute(command, now)
    }

    /// Выполнить команду. `now` — unix-время для записи в историю.
    pub fn execute(&mut self, command: Command, now: Timestamp) -> Result<CommandResponse, ApiError> {
        debug!(?command, balance = self.balance.0, "executing command");
        match command {
            Command::Blackjack(cmd) => self.execute_blackjack(cmd, now),
            Command::Roulette(cmd) => self.execute_roulette(cmd, now),
            Command::Slots(cmd) => self.execute_slots(cmd, now),
        }
    }

    pub fn query(&self, query: Query, now: Timestamp) -> QueryResponse {
        match query {
            Query::Balance => QueryResponse::Balance(self.balance),
            Query::BlackjackTable => {
                QueryResponse::BlackjackTable(BlackjackView::from_round(&self.blackjack, self.balance))
            }
            Query::RouletteTable => QueryResponse::RouletteTable(RouletteView::from_round(&self.roulette)),
            Query::AutoPlay => QueryResponse::AutoPlay(
                self.auto_play.as_ref().map(|a| AutoPlayView::from_auto(a, None)),
            ),
            Query::RecentHistory { limit } => QueryResponse::History(self.log.recent(limit)),
            Query::Stats => QueryResponse::Stats(SessionStats::compute(&self.log.records(), now)),
            Query::GameStats => QueryResponse::GameStats(per_game_stats(&self.log.records(), now)),
            Query::DailyStats { days } => {
                QueryResponse::DailyStats(daily_stats(&self.log.records(), now, days))
            }
        }
    }

    // ---------------------------------------------------------------------
    // Блэкджек
    // ---------------------------------------------------------------------

    fn execute_blackjack(
        &mut self,
        cmd: BlackjackCommand,
        now: Timestamp,
    ) -> Result<CommandResponse, ApiError> {
        let status = match cmd {
            BlackjackCommand::Deal { stake } => {
                let status = self.blackjack.deal(stake, self.balance, &mut self.rng)?;
                self.balance -= stake;
                status
            }
            BlackjackCommand::Hit => self.blackjack.hit()?,
            BlackjackCommand::Stand => self.blackjack.stand()?,
            BlackjackCommand::DoubleDown => {
                let extra = self.blackjack.stake();
                let status = self.blackjack.double_down(self.balance)?;
                self.balance -= extra;
                status
            }
            BlackjackCommand::DealerStep => self.blackjack.dealer_step()?,
            BlackjackCommand::PlayDealer => {
                BlackjackStatus::Finished(self.blackjack.play_dealer()?)
            }
            BlackjackCommand::Reset => {
                self.blackjack.reset()?;
                BlackjackStatus::Ongoing(self.blackjack.phase())
            }
        };

        let record = match status {
            BlackjackStatus::Finished(summary) => {
                Some(self.record(&summary.settlement, GameType::Blackjack, now))
            }
            BlackjackStatus::Ongoing(_) => None,
        };

        Ok(CommandResponse {
            balance: self.balance,
            view: GameView::Blackjack(BlackjackView::from_round(&self.blackjack, self.balance)),
            record,
        })
    }

    // ---------------------------------------------------------------------
    // Рулетка
    // ---------------------------------------------------------------------

    fn execute_roulette(
        &mut self,
        cmd: RouletteCommand,
        now: Timestamp,
    ) -> Result<CommandResponse, ApiError> {
        let mut record = None;

        match cmd {
            RouletteCommand::PlaceBet { bet, amount } => {
                self.roulette.place_bet(bet, amount, self.balance)?;
            }
            RouletteCommand::ClearBets => self.roulette.clear_bets()?,
            RouletteCommand::Spin => {
                let total = self.roulette.begin_spin(self.balance)?;
                self.balance -= total;
                let outcome = self.roulette.resolve(&mut self.rng)?;
                record = Some(self.record(&outcome.settlement, GameType::Roulette, now));
            }
            RouletteCommand::Reset => self.roulette.reset()?,
        }

        Ok(CommandResponse {
            balance: self.balance,
            view: GameView::Roulette(RouletteView::from_round(&self.roulette)),
            record,
        })
    }

    // ---------------------------------------------------------------------
    // Слоты
    // ---------------------------------------------------------------------

    fn execute_slots(&mut self, cmd: SlotsCommand, now: Timestamp) -> Result<CommandResponse, ApiError> {
        match cmd {
            SlotsCommand::Spin { stake } => {
                if self.auto_play.as_ref().is_some_and(|a| a.is_active()) {
                    return Err(EngineError::illegal("spin", "идёт автоигра").into());
                }
                let spin = self.slots.spin(stake, self.balance, &mut self.rng)?;
                let (view, record) = self.apply_spin(&spin, now);
                Ok(CommandResponse {
                    balance: self.balance,
                    view: GameView::Slots(view),
                    record: Some(record),
                })
            }
            SlotsCommand::StartAutoPlay { count, stake } => {
                if self.auto_play.as_ref().is_some_and(|a| a.is_active()) {
                    return Err(EngineError::illegal("auto_play", "автоигра уже идёт").into());
                }
                validate_stake(stake, self.balance)?;
                let auto = AutoPlay::start(count, stake)?;
                let view = AutoPlayView::from_auto(&auto, None);
                self.auto_play = Some(auto);
                Ok(CommandResponse {
                    balance: self.balance,
                    view: GameView::AutoPlay(view),
                    record: None,
                })
            }
            SlotsCommand::AutoPlayStep => {
                let Some(mut auto) = self.auto_play.take() else {
                    return Err(EngineError::illegal("auto_play_step", "автоигра не запущена").into());
                };
                let result = auto.next_spin(&self.slots, self.balance, &mut self.rng);
                let spin = match result {
                    Ok(spin) => spin,
                    Err(e) => {
                        self.auto_play = Some(auto);
                        return Err(e.into());
                    }
                };

                let (last_spin, record) = match spin {
                    Some(spin) => {
                        let (view, record) = self.apply_spin(&spin, now);
                        (Some(view), Some(record))
                    }
                    None => (None, None),
                };
                if !auto.is_active() {
                    info!(reason = ?auto.stop_reason(), "auto play finished");
                }

                let view = AutoPlayView::from_auto(&auto, last_spin);
                self.auto_play = Some(auto);
                Ok(CommandResponse {
                    balance: self.balance,
                    view: GameView::AutoPlay(view),
                    record,
                })
            }
            SlotsCommand::StopAutoPlay => {
                let Some(auto) = self.auto_play.as_mut() else {
                    return Err(EngineError::illegal("stop_auto_play", "автоигра не запущена").into());
                };
                auto.stop();
                let view = AutoPlayView::from_auto(auto, None);
                Ok(CommandResponse {
                    balance: self.balance,
                    view: GameView::AutoPlay(view),
                    record: None,
                })
            }
        }
    }

    fn apply_spin(&mut self, spin: &SlotSpin, now: Timestamp) -> (SlotSpinView, RoundRecord) {
        self.balance -= spin.settlement.stake;
        let record = self.record(&spin.settlement, GameType::Slots, now);
        (SlotSpinView::from_spin(spin, self.slots.catalog()), record)
    }

    /// Зачислить итог и записать раунд в журнал.
    fn record(&mut self, settlement: &Settlement, game_type: GameType, now: Timestamp) -> RoundRecord {
        self.balance = self.balance.apply_delta(settlement.balance_delta);
        let record = settlement.to_record(self.ids.next_round_id(), game_type, now);
        self.log.append(record.clone());

        info!(
            round_id = record.id,
            game = %game_type,
            profit = record.profit,
            balance = self.balance.0,
            "round recorded"
        );
        record
    }
}
