//! Европейская рулетка (один зеро).
//!
//! - `wheel` – свойства номеров, вращение, расчёт одной ставки;
//! - `bets` – виды ставок и таблица коэффициентов;
//! - `round` – раунд: накопление ставок, вращение, расчёт.

pub mod bets;
pub mod round;
pub mod wheel;

pub use bets::{BetColor, BetKind, BetOdds, Half, Parity, RouletteBet};
pub use round::{BetResolution, RouletteOutcome, RoulettePhase, RouletteRound};
pub use wheel::{
    classify, resolve_bet, spin, Color, NumberProperties, RouletteConfig, Wheel,
    EUROPEAN_RED_NUMBERS, MAX_NUMBER, POCKETS,
};
