//! Подсчёт очков руки в блэкджеке.
//!
//! Основная функция:
//!   `score(cards) -> u32`

pub mod score;

pub use score::{is_blackjack, is_bust, is_soft, score, BLACKJACK};
