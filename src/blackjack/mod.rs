//! Блэкджек: колода, ход дилера, конечный автомат раунда.
//!
//! Высокоуровневый объект: `BlackjackRound`
//! Основные операции:
//!   - `deal` – принять ставку и раздать по две карты
//!   - `hit` / `stand` / `double_down` – действия игрока
//!   - `dealer_step` – один шаг дилера (паузы между шагами делает клиент)
//!   - `reset` – вернуться к приёму ставки

pub mod dealer;
pub mod round;
pub mod rules;

pub use dealer::{create_deck, dealer_draw_one, dealer_should_draw};
pub use round::{compare_hands, BlackjackPhase, BlackjackRound, BlackjackStatus, BlackjackSummary};
pub use rules::{BlackjackResult, BlackjackRules, PayoutRatio};
