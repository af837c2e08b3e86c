//! Доменная модель казино: карты, колода, руки, фишки, итоги раундов.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod round;

// Базовые идентификаторы.
pub type RoundId = u64;
/// Unix-время в секундах. Engine часы не читает — время всегда приходит снаружи.
pub type Timestamp = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use round::*;
