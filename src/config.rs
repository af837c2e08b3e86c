//! Настройки заведения: правила блэкджека, колесо рулетки, автомат.
//!
//! Все секции имеют значения по умолчанию, поэтому частичный JSON
//! переопределяет только то, что в нём указано:
//!
//! ```json
//! { "blackjack": { "dealer_stands_on": 16 } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blackjack::BlackjackRules;
use crate::engine::EngineError;
use crate::roulette::RouletteConfig;
use crate::slots::SlotsConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CasinoConfig {
    pub blackjack: BlackjackRules,
    pub roulette: RouletteConfig,
    pub slots: SlotsConfig,
}

impl CasinoConfig {
    /// Разобрать и сразу проверить конфиг.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: CasinoConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("bad JSON: {e}")))?;
        config.validate()?;
        debug!("casino config loaded");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidConfig(format!("cannot serialize: {e}")))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.blackjack.validate()?;
        self.roulette.validate()?;
        self.slots.validate()?;
        Ok(())
    }
}
