//! Игровой движок казино: блэкджек, европейская рулетка, слоты.
//!
//! Движок чистый: баланс, время и хранение истории остаются у клиента.
//! Каждая игра — конечный автомат, который проверяет ставку, тянет
//! случайность через `engine::RandomSource` и возвращает `Settlement`.
//! `session::CasinoSession` показывает, как клиент склеивает всё вместе.

pub mod api;
pub mod blackjack;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod history;
pub mod infra;
pub mod roulette;
pub mod session;
pub mod slots;

pub use config::CasinoConfig;
pub use engine::{EngineError, RandomSource, Settlement};
pub use session::CasinoSession;
